//! Small helpers shared by the report generators and graph builder

pub mod string;
