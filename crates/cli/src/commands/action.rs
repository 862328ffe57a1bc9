/// Print an action's interpolated message, which already ends in a newline
///
pub(crate) fn handle_action(message: Option<&str>) -> i32 {
    if let Some(message) = message {
        print!("{message}");
    }

    0
}
