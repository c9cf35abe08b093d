//! Public landing page.
//!
//! Reads the shared settings snapshot, so it always has something to show:
//! the built-in baseline until (or instead of) the backend copy.

use leptos::prelude::*;

use crate::components::settings_provider::AppSettings;

#[component]
pub fn HomePage() -> impl IntoView {
    let settings = expect_context::<AppSettings>().state();
    let site = Memo::new(move |_| settings.get().settings);

    let social = move || {
        site.with(|s| {
            s.social_links
                .entries()
                .into_iter()
                .map(|(label, url)| (label, url.to_owned()))
                .collect::<Vec<_>>()
        })
    };

    view! {
        <main class="home-page">
            <header class="home-hero">
                <h1>{move || site.with(|s| s.site_name.clone())}</h1>
                <p class="home-hero__tagline">{move || site.with(|s| s.tagline.clone())}</p>
            </header>

            <section class="home-contact">
                <h2>"Contact"</h2>
                <address>{move || site.with(|s| s.address.clone())}</address>
                <Show when=move || site.with(|s| !s.contact_email.is_empty())>
                    <p>
                        <a href=move || site.with(|s| format!("mailto:{}", s.contact_email))>
                            {move || site.with(|s| s.contact_email.clone())}
                        </a>
                    </p>
                </Show>
                <Show when=move || site.with(|s| !s.contact_phone.is_empty())>
                    <p>{move || site.with(|s| s.contact_phone.clone())}</p>
                </Show>
                <a
                    class="home-contact__map"
                    href=move || site.with(|s| s.map_location.map_url())
                    target="_blank"
                    rel="noopener"
                >
                    "View on map"
                </a>
            </section>

            <nav class="home-social">
                <For
                    each=social
                    key=|(label, _)| *label
                    children=|(label, url)| view! { <a href=url target="_blank" rel="noopener">{label}</a> }
                />
            </nav>
        </main>
    }
}
