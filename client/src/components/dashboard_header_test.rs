use super::*;

#[test]
fn welcome_message_interpolates_display_name() {
    assert_eq!(welcome_message("thirupathip.aiml2023"), "Welcome, thirupathip.aiml2023");
}

#[test]
fn welcome_message_with_empty_name() {
    assert_eq!(welcome_message(""), "Welcome, ");
}
