use leptos::prelude::*;

#[component]
pub fn NotFoundPage() -> impl IntoView {
    view! {
        <main class="not-found-page">
            <h1>"Page not found"</h1>
            <a href="/">"Back to home"</a>
        </main>
    }
}
