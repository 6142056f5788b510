mod assignment;
mod callout;
mod import;
mod job;
mod schedule;
mod sro;

#[rustfmt::skip]
pub use {
    assignment::AssignmentService,
    callout::CalloutService,
    import::ImportService,
    job::JobService,
    schedule::ScheduleService,
    sro::SroService,
};
