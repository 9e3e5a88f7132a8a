use std::rc::Rc;

use leptos::prelude::*;
use leptos::task::spawn_local;
use log::warn;
use stockdesk::shared::{CONTENT_TYPE_CSV, Product};
use stockdesk::views::format_money;
use stockdesk::views::products::{
    EXPORT_FAILED, IMPORT_FAILED, ProductForm, ProductsController, SellForm,
};
use stockdesk::Notice;

use crate::auth::use_auth;
use crate::components::toast::use_toaster;
use crate::web::file;

#[component]
pub fn ProductsPage() -> impl IntoView {
    let auth = use_auth();
    let toaster = use_toaster();
    let controller = StoredValue::new_local(Rc::new(ProductsController::new(auth.api())));

    // Bumped whenever the controller's state may have changed.
    let tick = RwSignal::new(0u64);
    let bump = move || tick.update(|t| *t = t.wrapping_add(1));

    let form = RwSignal::new(ProductForm::default());
    let sell = RwSignal::new(SellForm::default());
    let file_input = NodeRef::<leptos::html::Input>::new();

    {
        let controller = controller.get_value();
        spawn_local(async move {
            let notice = controller.mount().await;
            toaster.show_opt(notice);
            bump();
        });
    }
    on_cleanup(move || {
        controller.try_with_value(|c| c.unmount());
    });

    let products = move || {
        tick.get();
        controller.with_value(|c| c.products())
    };
    let is_loading = move || {
        tick.get();
        controller.with_value(|c| c.is_loading())
    };
    let is_editing = move || {
        tick.get();
        controller.with_value(|c| c.editing().is_some())
    };

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let draft = form.get_untracked();
        let controller = controller.get_value();
        spawn_local(async move {
            let outcome = controller.submit(&draft).await;
            if outcome.succeeded() {
                form.set(ProductForm::default());
            }
            toaster.show(outcome.notice);
            bump();
        });
    };

    let on_cancel = move |_| {
        controller.with_value(|c| c.cancel_edit());
        form.set(ProductForm::default());
        bump();
    };

    let on_edit = move |product: &Product| {
        form.set(controller.with_value(|c| c.begin_edit(product)));
        bump();
    };

    let on_delete = move |id: String| {
        let controller = controller.get_value();
        spawn_local(async move {
            let outcome = controller.delete(&id).await;
            toaster.show(outcome.notice);
            bump();
        });
    };

    let on_sell = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let request = sell.get_untracked();
        let controller = controller.get_value();
        spawn_local(async move {
            let outcome = controller.sell(&request).await;
            if outcome.succeeded() {
                sell.set(SellForm::default());
            }
            toaster.show(outcome.notice);
            bump();
        });
    };

    let on_import = move |_| {
        let input = file_input.get_untracked();
        let controller = controller.get_value();
        spawn_local(async move {
            let selected = match &input {
                Some(input) => file::read_selected(input).await,
                None => Ok(None),
            };
            let notice = match selected {
                Ok(selected) => controller.import(selected).await.notice,
                Err(e) => Notice::error(IMPORT_FAILED).log(format!("reading file: {:?}", e)),
            };
            if let Some(input) = input {
                input.set_value("");
            }
            toaster.show(notice);
            bump();
        });
    };

    let on_export = move |_| {
        let controller = controller.get_value();
        spawn_local(async move {
            let outcome = controller.export().await;
            let notice = match outcome.value {
                Some(csv) => match file::download(csv.file_name, &csv.bytes, CONTENT_TYPE_CSV) {
                    Ok(()) => outcome.notice,
                    Err(e) => {
                        warn!("download failed: {:?}", e);
                        Notice::error(EXPORT_FAILED)
                    }
                },
                None => outcome.notice,
            };
            toaster.show(notice);
            bump();
        });
    };

    view! {
        <div class="min-h-screen bg-base-200 p-8 space-y-8">
            <h1 class="text-3xl font-bold">"Products"</h1>

            <div class="card bg-base-100 shadow">
                <form class="card-body grid gap-4 md:grid-cols-5" on:submit=on_submit>
                    <input
                        type="text"
                        placeholder="Name"
                        class="input input-bordered"
                        prop:value=move || form.get().name
                        on:input=move |ev| form.update(|f| f.name = event_target_value(&ev))
                    />
                    <input
                        type="text"
                        placeholder="Category"
                        class="input input-bordered"
                        prop:value=move || form.get().category
                        on:input=move |ev| form.update(|f| f.category = event_target_value(&ev))
                    />
                    <input
                        type="number"
                        step="0.01"
                        placeholder="Price"
                        class="input input-bordered"
                        prop:value=move || form.get().price
                        on:input=move |ev| form.update(|f| f.price = event_target_value(&ev))
                    />
                    <input
                        type="number"
                        placeholder="Quantity"
                        class="input input-bordered"
                        prop:value=move || form.get().quantity_in_stock
                        on:input=move |ev| {
                            form.update(|f| f.quantity_in_stock = event_target_value(&ev))
                        }
                    />
                    <div class="flex gap-2">
                        <button type="submit" class="btn btn-primary">
                            {move || if is_editing() { "Update" } else { "Add" }}
                        </button>
                        <Show when=is_editing>
                            <button type="button" class="btn" on:click=on_cancel>"Cancel"</button>
                        </Show>
                    </div>
                </form>
            </div>

            <div class="card bg-base-100 shadow">
                <form class="card-body flex flex-row flex-wrap gap-4 items-end" on:submit=on_sell>
                    <select
                        class="select select-bordered"
                        prop:value=move || sell.get().product_id
                        on:change=move |ev| sell.update(|s| s.product_id = event_target_value(&ev))
                    >
                        <option value="">"Select a product"</option>
                        {move || {
                            products()
                                .into_iter()
                                .map(|p| view! { <option value={p.id.clone()}>{p.name.clone()}</option> })
                                .collect_view()
                        }}
                    </select>
                    <input
                        type="number"
                        placeholder="Quantity"
                        class="input input-bordered"
                        prop:value=move || sell.get().quantity
                        on:input=move |ev| sell.update(|s| s.quantity = event_target_value(&ev))
                    />
                    <button type="submit" class="btn btn-secondary">"Sell"</button>

                    <div class="flex gap-2 ml-auto">
                        <input
                            type="file"
                            accept=".csv"
                            class="file-input file-input-bordered"
                            node_ref=file_input
                        />
                        <button type="button" class="btn" on:click=on_import>"Import CSV"</button>
                        <button type="button" class="btn" on:click=on_export>"Export CSV"</button>
                    </div>
                </form>
            </div>

            <div class="card bg-base-100 shadow overflow-x-auto">
                <Show
                    when=move || !is_loading()
                    fallback=|| view! { <span class="loading loading-spinner loading-lg m-8"></span> }
                >
                    <table class="table">
                        <thead>
                            <tr>
                                <th>"Name"</th>
                                <th>"Category"</th>
                                <th>"Price"</th>
                                <th>"In Stock"</th>
                                <th></th>
                            </tr>
                        </thead>
                        <tbody>
                            {move || {
                                products()
                                    .into_iter()
                                    .map(|product| {
                                        let id = product.id.clone();
                                        let editable = product.clone();
                                        view! {
                                            <tr>
                                                <td>{product.name}</td>
                                                <td>{product.category}</td>
                                                <td>{format_money(product.price)}</td>
                                                <td>{product.quantity_in_stock}</td>
                                                <td class="flex gap-2">
                                                    <button
                                                        class="btn btn-sm"
                                                        on:click=move |_| on_edit(&editable)
                                                    >
                                                        "Edit"
                                                    </button>
                                                    <button
                                                        class="btn btn-sm btn-error"
                                                        on:click=move |_| on_delete(id.clone())
                                                    >
                                                        "Delete"
                                                    </button>
                                                </td>
                                            </tr>
                                        }
                                    })
                                    .collect_view()
                            }}
                        </tbody>
                    </table>
                </Show>
            </div>
        </div>
    }
}
