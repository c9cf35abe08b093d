//! Admin dashboard: session header and the site settings editor.
//!
//! SYSTEM CONTEXT
//! ==============
//! Rendered only inside `ProtectedRoute`. Logging out clears the session; the
//! gate then evicts this page on its own. Saving submits only the fields that
//! differ from the current snapshot and the form is reset from whatever the
//! server returns.

#[cfg(test)]
#[path = "admin_test.rs"]
mod admin_test;

use leptos::prelude::*;

use crate::components::auth_provider::AppAuth;
use crate::components::settings_provider::AppSettings;
use crate::net::types::{SettingsUpdate, SiteSettings, SocialLinks};

/// Editable copy of the settings snapshot.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub(crate) struct SettingsForm {
    pub site_name: String,
    pub tagline: String,
    pub contact_email: String,
    pub contact_phone: String,
    pub address: String,
    pub facebook: String,
    pub twitter: String,
    pub instagram: String,
    pub youtube: String,
    pub linkedin: String,
}

impl SettingsForm {
    pub fn from_settings(settings: &SiteSettings) -> Self {
        let links = &settings.social_links;
        Self {
            site_name: settings.site_name.clone(),
            tagline: settings.tagline.clone(),
            contact_email: settings.contact_email.clone(),
            contact_phone: settings.contact_phone.clone(),
            address: settings.address.clone(),
            facebook: links.facebook.clone(),
            twitter: links.twitter.clone(),
            instagram: links.instagram.clone(),
            youtube: links.youtube.clone(),
            linkedin: links.linkedin.clone(),
        }
    }

    fn social_links(&self) -> SocialLinks {
        SocialLinks {
            facebook: self.facebook.trim().to_owned(),
            twitter: self.twitter.trim().to_owned(),
            instagram: self.instagram.trim().to_owned(),
            youtube: self.youtube.trim().to_owned(),
            linkedin: self.linkedin.trim().to_owned(),
        }
    }

    /// Validate and diff against `current`, yielding only changed fields.
    pub fn to_update(&self, current: &SiteSettings) -> Result<SettingsUpdate, &'static str> {
        let site_name = self.site_name.trim();
        if site_name.is_empty() {
            return Err("Site name is required.");
        }
        let email = self.contact_email.trim();
        if !email.is_empty() && !looks_like_email(email) {
            return Err("Contact email is not valid.");
        }

        let changed = |value: &str, old: &str| (value != old).then(|| value.to_owned());
        let links = self.social_links();
        Ok(SettingsUpdate {
            site_name: changed(site_name, &current.site_name),
            tagline: changed(self.tagline.trim(), &current.tagline),
            contact_email: changed(email, &current.contact_email),
            contact_phone: changed(self.contact_phone.trim(), &current.contact_phone),
            address: changed(self.address.trim(), &current.address),
            social_links: (links != current.social_links).then_some(links),
            map_location: None,
        })
    }
}

fn looks_like_email(value: &str) -> bool {
    match value.split_once('@') {
        Some((local, domain)) => !local.is_empty() && domain.contains('.') && !domain.starts_with('.'),
        None => false,
    }
}

fn text_field(
    label: &'static str,
    form: RwSignal<SettingsForm>,
    get: fn(&SettingsForm) -> String,
    set: fn(&mut SettingsForm, String),
) -> impl IntoView {
    view! {
        <label class="admin-form__label">
            {label}
            <input
                class="admin-form__input"
                type="text"
                prop:value=move || form.with(get)
                on:input=move |ev| {
                    let value = event_target_value(&ev);
                    form.update(|f| set(f, value));
                }
            />
        </label>
    }
}

#[component]
pub fn AdminPage() -> impl IntoView {
    let auth = expect_context::<AppAuth>();
    let settings = expect_context::<AppSettings>();
    let session = auth.state();
    let settings_state = settings.state();

    let snapshot = Memo::new(move |_| settings_state.get().settings);
    let form = RwSignal::new(SettingsForm::from_settings(&snapshot.get_untracked()));
    let notice = RwSignal::new(None::<(bool, String)>);

    Effect::new(move |_| {
        form.set(SettingsForm::from_settings(&snapshot.get()));
    });

    let admin_name = move || {
        session
            .get()
            .admin
            .map(|a| a.display_name().to_owned())
            .unwrap_or_default()
    };

    let on_logout = move |_| auth.logout();

    let on_save = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if settings_state.get_untracked().saving {
            return;
        }
        let update = match form.get_untracked().to_update(&snapshot.get_untracked()) {
            Ok(update) if update.is_empty() => {
                notice.set(Some((true, "No changes to save.".to_owned())));
                return;
            }
            Ok(update) => update,
            Err(message) => {
                notice.set(Some((false, message.to_owned())));
                return;
            }
        };
        notice.set(None);
        let settings = settings.clone();
        leptos::task::spawn_local(async move {
            match settings.update_settings(update).await {
                Ok(_) => notice.set(Some((true, "Settings saved.".to_owned()))),
                Err(message) => notice.set(Some((false, message))),
            }
        });
    };

    view! {
        <div class="admin-page">
            <header class="admin-page__header">
                <h1>"Site Administration"</h1>
                <span class="admin-page__self">{admin_name}</span>
                <button class="btn" on:click=on_logout>
                    "Log out"
                </button>
            </header>

            <form class="admin-form" on:submit=on_save>
                <h2>"General"</h2>
                {text_field("Site name", form, |f| f.site_name.clone(), |f, v| f.site_name = v)}
                {text_field("Tagline", form, |f| f.tagline.clone(), |f, v| f.tagline = v)}
                <h2>"Contact"</h2>
                {text_field("Email", form, |f| f.contact_email.clone(), |f, v| f.contact_email = v)}
                {text_field("Phone", form, |f| f.contact_phone.clone(), |f, v| f.contact_phone = v)}
                {text_field("Address", form, |f| f.address.clone(), |f, v| f.address = v)}
                <h2>"Social links"</h2>
                {text_field("Facebook", form, |f| f.facebook.clone(), |f, v| f.facebook = v)}
                {text_field("Twitter", form, |f| f.twitter.clone(), |f, v| f.twitter = v)}
                {text_field("Instagram", form, |f| f.instagram.clone(), |f, v| f.instagram = v)}
                {text_field("YouTube", form, |f| f.youtube.clone(), |f, v| f.youtube = v)}
                {text_field("LinkedIn", form, |f| f.linkedin.clone(), |f, v| f.linkedin = v)}
                <div class="admin-form__actions">
                    <button class="btn btn--primary" type="submit" disabled=move || settings_state.get().saving>
                        {move || if settings_state.get().saving { "Saving..." } else { "Save settings" }}
                    </button>
                </div>
                <Show when=move || notice.get().is_some()>
                    <p
                        class="admin-form__notice"
                        class=("admin-form__notice--error", move || notice.get().is_some_and(|(ok, _)| !ok))
                        role="status"
                    >
                        {move || notice.get().map(|(_, text)| text).unwrap_or_default()}
                    </p>
                </Show>
            </form>
        </div>
    }
}
