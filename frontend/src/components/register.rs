use std::rc::Rc;

use leptos::prelude::*;
use leptos::task::spawn_local;
use stockdesk::AppRoute;
use stockdesk::shared::Role;
use stockdesk::views::register::{RegisterController, RegisterForm};

use crate::auth::use_auth;
use crate::components::toast::use_toaster;
use crate::web::router::{Link, use_router};

fn parse_role(value: &str) -> Role {
    match value {
        "admin" => Role::Admin,
        _ => Role::User,
    }
}

#[component]
pub fn RegisterPage() -> impl IntoView {
    let auth = use_auth();
    let router = use_router();
    let toaster = use_toaster();
    let controller = StoredValue::new_local(Rc::new(RegisterController::new(auth.api())));

    let (name, set_name) = signal(String::new());
    let (email, set_email) = signal(String::new());
    let (password, set_password) = signal(String::new());
    let (role, set_role) = signal(Role::User);
    let (is_submitting, set_is_submitting) = signal(false);

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        if is_submitting.get_untracked() {
            return;
        }

        let form = RegisterForm {
            name: name.get_untracked(),
            email: email.get_untracked(),
            password: password.get_untracked(),
            role: role.get_untracked(),
        };
        let controller = controller.get_value();
        set_is_submitting.set(true);

        spawn_local(async move {
            let feedback = controller.submit(&form).await;
            set_is_submitting.set(false);
            toaster.show_opt(feedback.notice);
            if let Some(route) = feedback.navigate {
                router.navigate(route);
            }
        });
    };

    view! {
        <div class="hero min-h-screen bg-base-200">
            <div class="hero-content flex-col w-full max-w-md">
                <h1 class="text-3xl font-bold mb-4">"Register"</h1>
                <div class="card shrink-0 w-full shadow-2xl bg-base-100">
                    <form class="card-body" on:submit=on_submit>
                        <input
                            type="text"
                            placeholder="Name"
                            on:input=move |ev| set_name.set(event_target_value(&ev))
                            prop:value=name
                            class="input input-bordered"
                        />
                        <input
                            type="email"
                            placeholder="Email"
                            on:input=move |ev| set_email.set(event_target_value(&ev))
                            prop:value=email
                            class="input input-bordered"
                        />
                        <input
                            type="password"
                            placeholder="Password"
                            on:input=move |ev| set_password.set(event_target_value(&ev))
                            prop:value=password
                            class="input input-bordered"
                        />
                        <select
                            class="select select-bordered"
                            on:change=move |ev| set_role.set(parse_role(&event_target_value(&ev)))
                            prop:value=move || role.get().as_str()
                        >
                            <option value="user">"User"</option>
                            <option value="admin">"Admin"</option>
                        </select>
                        <button class="btn btn-primary mt-4" disabled=move || is_submitting.get()>
                            "Register"
                        </button>
                        <p class="text-sm text-center mt-2">
                            "Already registered? "
                            <Link to=AppRoute::Login class="link link-primary">"Login"</Link>
                        </p>
                    </form>
                </div>
            </div>
        </div>
    }
}
