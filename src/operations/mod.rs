pub mod camera_control_op;
pub mod camera_info_op;
pub mod diagnostic_op;
pub mod op_helper;
pub mod pan_op;
