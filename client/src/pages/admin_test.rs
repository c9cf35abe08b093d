use super::*;

fn current() -> SiteSettings {
    SiteSettings {
        site_name: "CoF".to_owned(),
        contact_email: "office@cof.in".to_owned(),
        ..SiteSettings::default()
    }
}

#[test]
fn untouched_form_yields_empty_update() {
    let settings = current();
    let update = SettingsForm::from_settings(&settings).to_update(&settings).unwrap();
    assert!(update.is_empty());
}

#[test]
fn changed_fields_are_trimmed_and_included() {
    let settings = current();
    let mut form = SettingsForm::from_settings(&settings);
    form.site_name = "  College of Fishery  ".to_owned();
    form.contact_phone = " 0761-000000 ".to_owned();

    let update = form.to_update(&settings).unwrap();
    assert_eq!(update.site_name.as_deref(), Some("College of Fishery"));
    assert_eq!(update.contact_phone.as_deref(), Some("0761-000000"));
    assert_eq!(update.contact_email, None);
    assert_eq!(update.social_links, None);
}

#[test]
fn whitespace_only_edit_is_not_a_change() {
    let settings = current();
    let mut form = SettingsForm::from_settings(&settings);
    form.site_name = " CoF ".to_owned();
    assert!(form.to_update(&settings).unwrap().is_empty());
}

#[test]
fn social_link_change_sends_all_links() {
    let settings = current();
    let mut form = SettingsForm::from_settings(&settings);
    form.youtube = "https://youtube.com/@cof".to_owned();

    let links = form.to_update(&settings).unwrap().social_links.unwrap();
    assert_eq!(links.youtube, "https://youtube.com/@cof");
    assert_eq!(links.facebook, settings.social_links.facebook);
}

#[test]
fn blank_site_name_is_rejected() {
    let settings = current();
    let mut form = SettingsForm::from_settings(&settings);
    form.site_name = "   ".to_owned();
    assert_eq!(form.to_update(&settings), Err("Site name is required."));
}

#[test]
fn invalid_email_is_rejected_but_blank_is_allowed() {
    let settings = current();
    let mut form = SettingsForm::from_settings(&settings);
    form.contact_email = "not-an-email".to_owned();
    assert_eq!(form.to_update(&settings), Err("Contact email is not valid."));

    form.contact_email = String::new();
    assert_eq!(form.to_update(&settings).unwrap().contact_email.as_deref(), Some(""));
}

#[test]
fn looks_like_email_cases() {
    assert!(looks_like_email("a@b.in"));
    assert!(!looks_like_email("@b.in"));
    assert!(!looks_like_email("a@bin"));
    assert!(!looks_like_email("a@.in"));
}
