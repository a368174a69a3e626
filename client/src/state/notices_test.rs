use super::*;

fn keys(list: &[&str]) -> Vec<String> {
    list.iter().map(|k| (*k).to_owned()).collect()
}

// =============================================================
// NoticeCenter
// =============================================================

#[test]
fn push_assigns_increasing_ids() {
    let mut center = NoticeCenter::default();
    let a = center.push(NoticeLevel::Info, "a");
    let b = center.push(NoticeLevel::Error, "b");
    assert!(b > a);
    assert_eq!(center.notices().len(), 2);
}

#[test]
fn dismiss_removes_only_that_notice() {
    let mut center = NoticeCenter::default();
    let a = center.push(NoticeLevel::Info, "a");
    center.push(NoticeLevel::Info, "b");
    center.dismiss(a);
    assert_eq!(center.notices().len(), 1);
    assert_eq!(center.notices()[0].message, "b");
    center.dismiss(999);
    assert_eq!(center.notices().len(), 1);
}

// =============================================================
// MissingConfigNotifier
// =============================================================

#[test]
fn three_missing_keys_emit_three_distinct_warnings() {
    let mut notifier = MissingConfigNotifier::default();
    let mut center = NoticeCenter::default();

    let created = notifier.notify(&keys(&["A", "B", "C"]), &mut center);

    assert_eq!(created.len(), 3);
    let messages: Vec<&str> = center.notices().iter().map(|n| n.message.as_str()).collect();
    assert_eq!(
        messages,
        vec![
            "Missing A environment variable!",
            "Missing B environment variable!",
            "Missing C environment variable!",
        ]
    );
    assert!(center.notices().iter().all(|n| n.level == NoticeLevel::Error));
}

#[test]
fn rerender_with_same_keys_emits_nothing() {
    let mut notifier = MissingConfigNotifier::default();
    let mut center = NoticeCenter::default();
    let list = keys(&["A", "B", "C"]);

    notifier.notify(&list, &mut center);
    let second = notifier.notify(&list, &mut center);

    assert!(second.is_empty());
    assert_eq!(center.notices().len(), 3);
}

#[test]
fn duplicate_and_blank_keys_are_suppressed() {
    let mut notifier = MissingConfigNotifier::default();
    let mut center = NoticeCenter::default();

    notifier.notify(&keys(&["A", "A", " ", "B"]), &mut center);

    assert_eq!(center.notices().len(), 2);
}

#[test]
fn new_key_in_later_list_is_announced() {
    let mut notifier = MissingConfigNotifier::default();
    let mut center = NoticeCenter::default();

    notifier.notify(&keys(&["A"]), &mut center);
    let created = notifier.notify(&keys(&["A", "D"]), &mut center);

    assert_eq!(created.len(), 1);
    assert_eq!(center.notices()[1].message, missing_key_message("D"));
}

#[test]
fn dismissed_warning_is_not_reannounced_on_same_mount() {
    let mut notifier = MissingConfigNotifier::default();
    let mut center = NoticeCenter::default();
    let created = notifier.notify(&keys(&["A"]), &mut center);
    center.dismiss(created[0]);

    notifier.notify(&keys(&["A"]), &mut center);

    assert!(center.is_empty());
}
