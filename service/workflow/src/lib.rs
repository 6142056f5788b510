mod assignment;
mod callout;
mod compatibility;
mod config;
mod import;
mod job;
mod retry;
mod schedule;
mod sro;

#[rustfmt::skip]
pub use {
    assignment::AssignmentServiceImpl,
    callout::CalloutServiceImpl,
    compatibility::CompatibilityValidator,
    config::OrchestratorConfig,
    import::ImportServiceImpl,
    job::JobServiceImpl,
    schedule::ScheduleServiceImpl,
    sro::SroServiceImpl,
};
