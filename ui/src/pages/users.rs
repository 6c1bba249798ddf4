// Users management page
use gloo_file::{futures::read_as_bytes, FileReadError};
use leptos::*;
use std::rc::Rc;
use tracing::warn;

use crate::api::HttpUserApi;
use crate::components::buttons::{ActionButton, ButtonKind};
use crate::components::forms::FieldInput;
use crate::components::layout::{Card, PageHeader};
use crate::components::notifications::{BrowserNotifier, NoticeBanner};
use crate::components::tables::{DataTable, EmptyRow};
use crate::config::Config;
use crate::manager::{Notice, Notifier, Operation, Outcome, UserManager};
use crate::state::UsersState;
use crate::types::{FormField, ImageFile, User};

type PageManager = UserManager<HttpUserApi, BrowserNotifier, RwSignal<UsersState>>;

#[component]
pub fn UsersPage() -> impl IntoView {
    let config = expect_context::<Config>();
    let state = create_rw_signal(UsersState::default());
    let notice = create_rw_signal(None::<Notice>);
    let manager = Rc::new(UserManager::new(
        HttpUserApi::new(config.clone()),
        BrowserNotifier::new(notice),
        state,
    ));

    let initial = manager.clone();
    spawn_local(async move {
        initial.fetch_users().await;
    });

    view! {
        <PageHeader
            title="User Management"
            description="Create, edit and remove user accounts"
        />
        <NoticeBanner notice=notice/>
        <UserForm manager=manager.clone() state=state/>
        <UsersTable manager=manager config=config state=state/>
    }
}

#[component]
fn UserForm(manager: Rc<PageManager>, state: RwSignal<UsersState>) -> impl IntoView {
    let editing = move || state.with(|s| s.mode().is_editing());

    let submitter = manager.clone();
    let on_submit = move |ev: ev::SubmitEvent| {
        ev.prevent_default();
        let manager = submitter.clone();
        spawn_local(async move {
            manager.submit().await;
        });
    };

    let on_cancel = Callback::new(move |_| manager.cancel_edit());

    let title = Signal::derive(move || {
        let title = if editing() { "Edit User" } else { "Add New User" };
        title.to_string()
    });

    view! {
        <Card title=title>
            <form class="flex flex-wrap gap-3" on:submit=on_submit>
                {FormField::ALL
                    .into_iter()
                    .map(|field| view! { <FieldInput field=field state=state/> })
                    .collect_view()}
                <button
                    type="submit"
                    class="rounded-md bg-blue-600 px-3 py-2 text-sm font-semibold text-white hover:bg-blue-700"
                >
                    {move || if editing() { "Update User" } else { "Add User" }}
                </button>
                {move || editing().then(|| view! {
                    <ActionButton text="Cancel" on_click=on_cancel kind=ButtonKind::Secondary/>
                })}
            </form>
        </Card>
    }
}

#[component]
fn UsersTable(
    manager: Rc<PageManager>,
    config: Config,
    state: RwSignal<UsersState>,
) -> impl IntoView {
    let is_empty = move || state.with(|s| s.users.is_empty());

    view! {
        <Card title="Users">
            <DataTable columns=&User::COLUMNS>
                // Keyed by content so edited rows re-render.
                <For
                    each=move || state.with(|s| s.users.clone())
                    key=|user| user.clone()
                    children=move |user| view! {
                        <UserRow user=user manager=manager.clone() config=config.clone()/>
                    }
                />
                {move || is_empty().then(|| view! {
                    <EmptyRow columns=User::COLUMNS.len() message="No users found. Add one above!"/>
                })}
            </DataTable>
        </Card>
    }
}

#[component]
fn UserRow(user: User, manager: Rc<PageManager>, config: Config) -> impl IntoView {
    let file_input = create_node_ref::<html::Input>();
    let image = user
        .profile_image
        .as_deref()
        .map(|reference| config.asset_url(reference));
    let cells = user.table_cells().map(str::to_owned);

    let on_edit = {
        let manager = manager.clone();
        let user = user.clone();
        Callback::new(move |_| manager.start_edit(&user))
    };

    let on_delete = {
        let manager = manager.clone();
        let id = user.id.clone();
        Callback::new(move |_| {
            let manager = manager.clone();
            let id = id.clone();
            spawn_local(async move {
                manager.delete_user(id).await;
            });
        })
    };

    let on_upload = {
        let id = user.id.clone();
        Callback::new(move |_| {
            let manager = manager.clone();
            let id = id.clone();
            // The selection is taken now; only the byte read is deferred.
            let input = file_input.get_untracked();
            let selected = input
                .as_ref()
                .and_then(|input| input.files())
                .and_then(|files| files.get(0));

            spawn_local(async move {
                let file = match selected {
                    Some(file) => match read_image(file).await {
                        Ok(file) => Some(file),
                        Err(err) => {
                            warn!(error = ?err, "could not read selected image");
                            manager.notifier().notify(Notice::Failed(Operation::Upload));
                            return;
                        }
                    },
                    None => None,
                };

                if manager.upload_image(id, file).await == Outcome::Succeeded {
                    if let Some(input) = input {
                        input.set_value("");
                    }
                }
            });
        })
    };

    view! {
        <tr>
            {cells
                .into_iter()
                .map(|cell| view! { <td class="px-3 py-2 text-sm text-gray-700">{cell}</td> })
                .collect_view()}
            <td class="px-3 py-2">
                {image.map(|src| view! {
                    <img src=src alt="Profile" class="h-10 w-10 rounded-full object-cover"/>
                })}
            </td>
            <td class="px-3 py-2">
                <div class="flex flex-wrap items-center gap-2">
                    <ActionButton text="Edit" on_click=on_edit kind=ButtonKind::Secondary/>
                    <ActionButton text="Delete" on_click=on_delete kind=ButtonKind::Danger/>
                    <input type="file" accept="image/*" class="text-sm" node_ref=file_input/>
                    <ActionButton text="Upload" on_click=on_upload/>
                </div>
            </td>
        </tr>
    }
}

async fn read_image(file: web_sys::File) -> Result<ImageFile, FileReadError> {
    let file = gloo_file::File::from(file);
    let bytes = read_as_bytes(&file).await?;
    Ok(ImageFile::new(file.name(), file.raw_mime_type(), bytes))
}
