/// ProgressReporter port for reporting progress during operations
///
/// This port abstracts progress reporting (e.g., to stderr)
/// to provide user feedback during a run.
pub trait ProgressReporter {
    /// Reports a progress message
    ///
    /// # Arguments
    /// * `message` - The progress message to report
    fn report(&self, message: &str);

    /// Reports an error or warning message
    ///
    /// # Arguments
    /// * `message` - The error/warning message
    fn report_error(&self, message: &str);

    /// Reports completion of an operation
    ///
    /// # Arguments
    /// * `message` - Completion message
    fn report_completion(&self, message: &str);

    /// Shows an indeterminate spinner while a blocking call is in flight
    ///
    /// The default does nothing, for reporters without a terminal.
    fn start_spinner(&self, _message: &str) {}

    /// Clears the spinner started by `start_spinner`
    fn finish_spinner(&self) {}
}

impl<T: ProgressReporter + ?Sized> ProgressReporter for &T {
    fn report(&self, message: &str) {
        (**self).report(message)
    }

    fn report_error(&self, message: &str) {
        (**self).report_error(message)
    }

    fn report_completion(&self, message: &str) {
        (**self).report_completion(message)
    }

    fn start_spinner(&self, message: &str) {
        (**self).start_spinner(message)
    }

    fn finish_spinner(&self) {
        (**self).finish_spinner()
    }
}
