use super::*;

#[test]
fn phone_user_agents_are_mobile() {
    assert!(is_mobile_user_agent(
        "Mozilla/5.0 (iPhone; CPU iPhone OS 17_4 like Mac OS X) AppleWebKit/605.1.15 Mobile/15E148"
    ));
    assert!(is_mobile_user_agent("Mozilla/5.0 (Linux; Android 14; Pixel 8) Chrome/124.0 Mobile Safari/537.36"));
    assert!(is_mobile_user_agent("Opera/9.80 (J2ME/MIDP; Opera Mini/9.80)"));
}

#[test]
fn desktop_user_agents_are_not_mobile() {
    assert!(!is_mobile_user_agent(
        "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 Chrome/124.0 Safari/537.36"
    ));
    assert!(!is_mobile_user_agent("Mozilla/5.0 (X11; Linux x86_64; rv:125.0) Gecko/20100101 Firefox/125.0"));
    assert!(!is_mobile_user_agent(""));
}

#[cfg(not(feature = "hydrate"))]
#[test]
fn server_environment_is_desktop_sized() {
    assert!(!is_mobile());
    assert!(!is_narrow_viewport());
}
