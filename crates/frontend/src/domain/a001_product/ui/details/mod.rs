//! Product page: creation form when `id` is `None`, otherwise the editor of
//! an existing product and its presentations.

pub mod view_model;

use contracts::domain::a001_product::taxonomy::{category_names, subcategories_of, PRODUCT_TYPES};
use contracts::domain::a001_product::{Presentation, Product};
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;

use self::view_model::{ProductDetailsVm, ProductInput, STATUS_OPTIONS};
use crate::domain::a001_product::api;
use crate::domain::a001_product::store::{upsert, use_catalog};
use crate::domain::a001_product::ui::presentation::view_model::PresentationField;
use crate::domain::a001_product::ui::presentation::{PresentationEditor, PresentationFields};
use crate::shared::http::ApiClient;
use crate::shared::icons::icon;
use crate::shared::page_frame::PageFrame;
use crate::shared::page_standard::PAGE_CAT_DETAIL;
use crate::system::auth::context::use_session;

fn confirm(message: &str) -> bool {
    web_sys::window()
        .and_then(|w| w.confirm_with_message(message).ok())
        .unwrap_or(false)
}

/// Options for a fixed list, keeping a stored value that is not in the list.
fn options_with_current(fixed: Vec<&'static str>, current: &str) -> Vec<String> {
    let mut options: Vec<String> = fixed.into_iter().map(str::to_string).collect();
    if !current.is_empty() && !options.iter().any(|o| o == current) {
        options.insert(0, current.to_string());
    }
    options
}

#[component]
fn ChoiceField(
    label: &'static str,
    #[prop(into)] options: Signal<Vec<String>>,
    #[prop(into)] value: Signal<String>,
    on_change: Callback<String>,
) -> impl IntoView {
    view! {
        <div class="form__group">
            <label class="form__label">{label}</label>
            <select
                class="form__select"
                prop:value=move || value.get()
                on:change=move |ev| on_change.run(event_target_value(&ev))
            >
                <option value="">"-- Selecciona --"</option>
                <For
                    each=move || options.get()
                    key=|o| o.clone()
                    children=move |o: String| {
                        let selected_value = o.clone();
                        let option_value = o.clone();
                        view! {
                            <option value=option_value selected=move || value.get() == selected_value>{o}</option>
                        }
                    }
                />
            </select>
        </div>
    }
}

/// Header fields shared by both modes.
#[component]
fn ProductHeaderFields(form: RwSignal<ProductInput>) -> impl IntoView {
    let text_input = move |label: &'static str,
                           get: fn(&ProductInput) -> String,
                           set: fn(&mut ProductInput, String)| {
        view! {
            <div class="form__group">
                <label class="form__label">{label}</label>
                <input
                    class="form__input"
                    type="text"
                    prop:value=move || form.with(get)
                    on:input=move |ev| form.update(|f| set(f, event_target_value(&ev)))
                />
            </div>
        }
    };

    view! {
        <div class="detail-form" style="display: grid; grid-template-columns: repeat(2, minmax(0, 1fr)); gap: 8px 12px;">
            {text_input("Código *", |f| f.code.clone(), |f, v| f.code = v)}
            {text_input("Nombre *", |f| f.name.clone(), |f, v| f.name = v)}
            <ChoiceField
                label="Tipo *"
                options=Signal::derive(move || {
                    form.with(|f| options_with_current(PRODUCT_TYPES.to_vec(), &f.kind))
                })
                value=Signal::derive(move || form.with(|f| f.kind.clone()))
                on_change=Callback::new(move |v: String| form.update(|f| f.kind = v))
            />
            <ChoiceField
                label="Estado *"
                options=Signal::derive(move || {
                    form.with(|f| options_with_current(STATUS_OPTIONS.to_vec(), &f.status))
                })
                value=Signal::derive(move || form.with(|f| f.status.clone()))
                on_change=Callback::new(move |v: String| form.update(|f| f.status = v))
            />
            <ChoiceField
                label="Categoría *"
                options=Signal::derive(move || {
                    form.with(|f| options_with_current(category_names().collect(), &f.category))
                })
                value=Signal::derive(move || form.with(|f| f.category.clone()))
                on_change=Callback::new(move |v: String| form.update(|f| f.select_category(v)))
            />
            <ChoiceField
                label="Subcategoría"
                options=Signal::derive(move || {
                    form.with(|f| {
                        options_with_current(subcategories_of(&f.category).to_vec(), &f.subcategory)
                    })
                })
                value=Signal::derive(move || form.with(|f| f.subcategory.clone()))
                on_change=Callback::new(move |v: String| form.update(|f| f.subcategory = v))
            />
            <div class="form__group" style="grid-column: 1 / -1;">
                <label class="form__label">"Descripción"</label>
                <textarea
                    class="form__textarea"
                    rows="3"
                    prop:value=move || form.with(|f| f.description.clone())
                    on:input=move |ev| form.update(|f| f.description = event_target_value(&ev))
                />
            </div>
        </div>
    }
}

fn error_box(vm: ProductDetailsVm) -> impl IntoView {
    move || {
        vm.error.get().map(|err| view! {
            <div style="padding: 8px 12px; margin: 10px 0; background: var(--color-error-50); border: 1px solid var(--color-error-100); border-radius: 6px; color: var(--color-error);">
                {err}
            </div>
        })
    }
}

#[component]
pub fn ProductDetails(id: Option<String>, on_close: Callback<()>) -> impl IntoView {
    match id {
        None => view! { <ProductCreateForm on_close=on_close /> }.into_any(),
        Some(id) => view! { <ProductEditor id=id on_close=on_close /> }.into_any(),
    }
}

#[component]
fn ProductCreateForm(on_close: Callback<()>) -> impl IntoView {
    let session = use_session();
    let catalog = use_catalog();
    let vm = ProductDetailsVm::new();

    let save = move |_| {
        vm.error.set(None);
        let draft = match vm
            .form
            .with_untracked(|f| vm.presentations.with_untracked(|rows| f.to_draft(rows)))
        {
            Ok(draft) => draft,
            Err(e) => {
                vm.error.set(Some(e.to_string()));
                return;
            }
        };
        vm.saving.set(true);
        spawn_local(async move {
            let client = ApiClient::new(session);
            let result = catalog.create_product(&client, draft).await;
            let _ = vm.saving.try_set(false);
            match result {
                Ok(_) => on_close.run(()),
                Err(e) => {
                    let _ = vm.error.try_set(Some(e.to_string()));
                }
            }
        });
    };

    view! {
        <PageFrame page_id="a001_product--detail" category=PAGE_CAT_DETAIL>
            <div class="page__header">
                <div class="page__header-left">
                    <h1 class="page__title">"Nuevo producto"</h1>
                </div>
                <div class="page__header-right">
                    <Space>
                        <Button
                            appearance=ButtonAppearance::Primary
                            on_click=save
                            disabled=Signal::derive(move || vm.saving.get())
                        >
                            {move || if vm.saving.get() { "Guardando..." } else { "Guardar" }}
                        </Button>
                        <Button on_click=move |_| on_close.run(())>"Cancelar"</Button>
                    </Space>
                </div>
            </div>

            <div class="page__content">
                {error_box(vm)}
                <ProductHeaderFields form=vm.form />

                <Flex justify=FlexJustify::SpaceBetween align=FlexAlign::Center attr:style="margin-top: 16px;">
                    <h3 style="margin: 0;">"Presentaciones"</h3>
                    <Button on_click=move |_| vm.add_presentation_row()>
                        {icon("plus")}
                        " Agregar presentación"
                    </Button>
                </Flex>

                <For
                    each=move || 0..vm.presentations.with(Vec::len)
                    key=|index| *index
                    children=move |index: usize| {
                        view! {
                            <Card attr:style="margin-top: 10px; padding: 12px;">
                                <Flex justify=FlexJustify::SpaceBetween align=FlexAlign::Center>
                                    <strong>{format!("Presentación {}", index + 1)}</strong>
                                    <Show when=move || vm.presentations.with(|rows| rows.len() > 1)>
                                        <Button on_click=move |_| vm.remove_presentation_row(index)>
                                            {icon("trash")}
                                            " Quitar"
                                        </Button>
                                    </Show>
                                </Flex>
                                <PresentationFields
                                    value=Signal::derive(move || {
                                        vm.presentations.with(|rows| rows.get(index).cloned().unwrap_or_default())
                                    })
                                    on_change=Callback::new(move |(field, text): (PresentationField, String)| {
                                        vm.presentations.update(|rows| {
                                            if let Some(row) = rows.get_mut(index) {
                                                row.set(field, text);
                                            }
                                        });
                                    })
                                />
                            </Card>
                        }
                    }
                />
            </div>
        </PageFrame>
    }
}

/// Which presentation dialog is open.
#[derive(Clone, PartialEq)]
enum Dialog {
    Closed,
    Add,
    Edit(Presentation),
}

#[component]
fn ProductEditor(id: String, on_close: Callback<()>) -> impl IntoView {
    let session = use_session();
    let catalog = use_catalog();
    let vm = ProductDetailsVm::new();
    let dialog = RwSignal::new(Dialog::Closed);
    let product_id = StoredValue::new(id.clone());

    let products = catalog.as_stream();
    let product = Memo::new(move |_| {
        let id = product_id.get_value();
        products.with(|list| list.iter().find(|p| p.id == id).cloned())
    });

    // Opened from a bookmarked URL: the list may not contain it yet.
    if catalog.current().iter().all(|p| p.id != id) {
        spawn_local(async move {
            let client = ApiClient::new(session);
            match api::fetch_product(&client, &product_id.get_value()).await {
                Ok(fetched) => catalog.set_all(upsert(&catalog.current(), fetched)),
                Err(e) => {
                    let _ = vm.error.try_set(Some(e.to_string()));
                }
            }
        });
    }

    // Fill the form once, when the product first becomes available.
    Effect::new(move |filled: Option<bool>| {
        if filled == Some(true) {
            return true;
        }
        match product.get() {
            Some(p) => {
                vm.form.set(ProductInput::from_product(&p));
                true
            }
            None => false,
        }
    });

    let save = move |_| {
        let Some(current) = product.get_untracked() else {
            return;
        };
        let next = vm.form.with_untracked(|f| f.apply_to(&current));
        vm.error.set(None);
        vm.saving.set(true);
        spawn_local(async move {
            let client = ApiClient::new(session);
            let result = catalog.update_product(&client, next).await;
            let _ = vm.saving.try_set(false);
            if let Err(e) = result {
                let _ = vm.error.try_set(Some(e.to_string()));
            }
        });
    };

    let delete_product = move |_| {
        let Some(current) = product.get_untracked() else {
            return;
        };
        if !confirm(&format!("¿Eliminar el producto «{}»?", current.name)) {
            return;
        }
        spawn_local(async move {
            let client = ApiClient::new(session);
            match catalog.delete_product(&client, &current.id).await {
                Ok(()) => on_close.run(()),
                Err(e) => {
                    let _ = vm.error.try_set(Some(e.to_string()));
                }
            }
        });
    };

    let delete_presentation = move |current: Product, presentation: Presentation| {
        let message = if current.presentations.len() == 1 {
            format!(
                "«{}» es la única presentación. Se eliminará el producto completo. ¿Continuar?",
                presentation.label()
            )
        } else {
            format!("¿Eliminar la presentación «{}»?", presentation.label())
        };
        if !confirm(&message) {
            return;
        }
        spawn_local(async move {
            let client = ApiClient::new(session);
            match catalog
                .delete_presentation(&client, &current.id, &presentation.id)
                .await
            {
                Ok(Some(_)) => {}
                Ok(None) => on_close.run(()),
                Err(e) => {
                    let _ = vm.error.try_set(Some(e.to_string()));
                }
            }
        });
    };

    view! {
        <PageFrame page_id="a001_product--detail" category=PAGE_CAT_DETAIL>
            <div class="page__header">
                <div class="page__header-left">
                    <h1 class="page__title">
                        {move || product.get().map(|p| p.name).unwrap_or_else(|| "Producto".to_string())}
                    </h1>
                </div>
                <div class="page__header-right">
                    <Space>
                        <Button
                            appearance=ButtonAppearance::Primary
                            on_click=save
                            disabled=Signal::derive(move || vm.saving.get() || product.get().is_none())
                        >
                            {move || if vm.saving.get() { "Guardando..." } else { "Guardar cambios" }}
                        </Button>
                        <Button
                            on_click=delete_product
                            disabled=Signal::derive(move || product.get().is_none())
                        >
                            {icon("trash")}
                            " Eliminar"
                        </Button>
                        <Button on_click=move |_| on_close.run(())>"Cerrar"</Button>
                    </Space>
                </div>
            </div>

            <div class="page__content">
                {error_box(vm)}
                <Show
                    when=move || product.get().is_some()
                    fallback=|| view! { <Spinner /> }
                >
                    <ProductHeaderFields form=vm.form />

                    <Flex justify=FlexJustify::SpaceBetween align=FlexAlign::Center attr:style="margin-top: 16px;">
                        <h3 style="margin: 0;">"Presentaciones"</h3>
                        <Button on_click=move |_| dialog.set(Dialog::Add)>
                            {icon("plus")}
                            " Agregar presentación"
                        </Button>
                    </Flex>

                    <Table attr:style="width: 100%; margin-top: 8px;">
                        <TableHeader>
                            <TableRow>
                                <TableHeaderCell>"SKU"</TableHeaderCell>
                                <TableHeaderCell>"Formato"</TableHeaderCell>
                                <TableHeaderCell>"Capacidad"</TableHeaderCell>
                                <TableHeaderCell>"Precio venta"</TableHeaderCell>
                                <TableHeaderCell>"Stock"</TableHeaderCell>
                                <TableHeaderCell>"Proveedor"</TableHeaderCell>
                                <TableHeaderCell>"Vencimiento"</TableHeaderCell>
                                <TableHeaderCell>""</TableHeaderCell>
                            </TableRow>
                        </TableHeader>
                        <TableBody>
                            {move || {
                                product.get().map(|p| p.presentations).unwrap_or_default()
                                    .into_iter()
                                    .map(|pres| {
                                        let low = pres.is_below_min_stock();
                                        let for_edit = pres.clone();
                                        let for_delete = pres.clone();
                                        view! {
                                            <TableRow>
                                                <TableCell><TableCellLayout>{pres.sku}</TableCellLayout></TableCell>
                                                <TableCell><TableCellLayout>{pres.format}</TableCellLayout></TableCell>
                                                <TableCell><TableCellLayout>{pres.capacity}</TableCellLayout></TableCell>
                                                <TableCell><TableCellLayout>{format!("${:.2}", pres.sale_price)}</TableCellLayout></TableCell>
                                                <TableCell>
                                                    <TableCellLayout>
                                                        <span style=if low { "color: var(--color-error); font-weight: 600;" } else { "" }>
                                                            {format!("{} / mín. {}", pres.stock, pres.min_stock)}
                                                        </span>
                                                    </TableCellLayout>
                                                </TableCell>
                                                <TableCell><TableCellLayout>{pres.supplier}</TableCellLayout></TableCell>
                                                <TableCell><TableCellLayout>{pres.expiry_date}</TableCellLayout></TableCell>
                                                <TableCell>
                                                    <TableCellLayout>
                                                        <Space>
                                                            <Button on_click=move |_| dialog.set(Dialog::Edit(for_edit.clone()))>
                                                                {icon("edit")}
                                                            </Button>
                                                            <Button on_click=move |_| {
                                                                if let Some(current) = product.get_untracked() {
                                                                    delete_presentation(current, for_delete.clone());
                                                                }
                                                            }>
                                                                {icon("trash")}
                                                            </Button>
                                                        </Space>
                                                    </TableCellLayout>
                                                </TableCell>
                                            </TableRow>
                                        }
                                    })
                                    .collect_view()
                            }}
                        </TableBody>
                    </Table>
                </Show>
            </div>

            {move || {
                let target = match dialog.get() {
                    Dialog::Closed => return None,
                    Dialog::Add => None,
                    Dialog::Edit(p) => Some(p),
                };
                Some(view! {
                    <PresentationEditor
                        product_id=product_id.get_value()
                        presentation=target
                        on_close=Callback::new(move |_: ()| dialog.set(Dialog::Closed))
                    />
                })
            }}
        </PageFrame>
    }
}
