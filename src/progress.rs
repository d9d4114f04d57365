// src/progress.rs
/// Progress reporting for a collection run.
/// Frontends implement this to surface status to users.
pub trait Progress {
    /// Called at the start with the number of records wanted.
    fn begin(&mut self, _target: usize) {}

    /// Free-form status line, e.g. why collection stopped early.
    fn log(&mut self, _msg: &str) {}

    /// One page processed: records kept from it, running total.
    fn page_done(&mut self, _page: u32, _kept: usize, _total: usize) {}

    /// Called at the end with the number of records returned.
    fn finish(&mut self, _total: usize) {}
}
