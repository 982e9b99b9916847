pub mod dashboard;
pub mod departments;
pub mod trends;

pub use dashboard::DashboardService;
pub use departments::department_load;
pub use trends::patient_trends;
