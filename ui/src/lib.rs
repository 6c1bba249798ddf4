// User Manager UI - browser front end for the user REST backend
use leptos::*;
use leptos_meta::*;
use leptos_router::*;

pub mod api;
pub mod components;
pub mod config;
pub mod logging;
pub mod manager;
pub mod pages;
pub mod state;
pub mod types;

use components::layout::Layout;
use config::Config;
use pages::*;

#[component]
pub fn App(config: Config) -> impl IntoView {
    provide_meta_context();
    provide_context(config);

    view! {
        <Title text="User Management"/>
        <Meta name="description" content="Create, edit and delete users against the user REST backend"/>
        <Meta name="viewport" content="width=device-width, initial-scale=1"/>

        <Router>
            <Layout>
                <Routes>
                    <Route path="/" view=UsersPage/>

                    // 404 fallback
                    <Route path="/*any" view=NotFoundPage/>
                </Routes>
            </Layout>
        </Router>
    }
}

/// Browser entry point: logging, panic hook, configuration, then mount.
#[cfg(feature = "csr")]
pub fn mount() {
    console_error_panic_hook::set_once();
    logging::init();

    match Config::from_build_env() {
        Ok(config) => {
            tracing::info!(api_url = %config.api_url(), "mounting user manager");
            leptos::mount_to_body(move || view! { <App config=config.clone()/> });
        }
        Err(err) => {
            tracing::error!(error = %err, "invalid configuration");
            let message = err.to_string();
            leptos::mount_to_body(move || view! {
                <p class="p-8 text-red-700">{message.clone()}</p>
            });
        }
    }
}
