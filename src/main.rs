use miette::Result;

/// Main entry point for the pkg-carousel CLI tool
fn main() -> Result<()> {
    // Install miette's panic hook for readable crash reports
    miette::set_panic_hook();

    pkg_carousel::run()
}
