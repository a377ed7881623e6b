/// Target used by [`success!`](crate::success) so the terminal formatter can
/// render confirmations differently from plain info events.
pub const SUCCESS_TARGET: &str = "ciphercert::success";

#[macro_export]
macro_rules! success {
    ($($arg:tt)*) => {
        ::tracing::info!(target: $crate::log::SUCCESS_TARGET, $($arg)*)
    };
}
