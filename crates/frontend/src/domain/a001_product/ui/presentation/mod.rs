//! Presentation form fields and the add/edit dialog.

pub mod view_model;

use contracts::domain::a001_product::Presentation;
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;

use self::view_model::{PresentationField, PresentationFormVm, PresentationInput};
use crate::domain::a001_product::store::use_catalog;
use crate::shared::http::ApiClient;
use crate::shared::modal_frame::ModalFrame;
use crate::system::auth::context::use_session;

/// Grid of inputs for one presentation. Edits are reported per field.
#[component]
pub fn PresentationFields(
    #[prop(into)] value: Signal<PresentationInput>,
    on_change: Callback<(PresentationField, String)>,
) -> impl IntoView {
    view! {
        <div class="detail-form" style="display: grid; grid-template-columns: repeat(3, minmax(0, 1fr)); gap: 8px 12px;">
            {PresentationField::ALL
                .into_iter()
                .map(|field| {
                    let wide = field == PresentationField::Notes;
                    view! {
                        <div class="form__group" style=if wide { "grid-column: 1 / -1;" } else { "" }>
                            <label class="form__label">
                                {field.label()}
                                {field.is_required().then_some(" *")}
                            </label>
                            <input
                                class="form__input"
                                type=field.input_type()
                                step=(field.input_type() == "number").then_some("any")
                                prop:value=move || value.with(|f| f.get(field).to_string())
                                on:input=move |ev| on_change.run((field, event_target_value(&ev)))
                            />
                        </div>
                    }
                })
                .collect_view()}
        </div>
    }
}

/// Dialog that adds a presentation to `product_id`, or edits `presentation`
/// when one is given.
#[component]
pub fn PresentationEditor(
    product_id: String,
    presentation: Option<Presentation>,
    on_close: Callback<()>,
) -> impl IntoView {
    let session = use_session();
    let catalog = use_catalog();

    let is_edit = presentation.is_some();
    let initial = presentation
        .as_ref()
        .map(PresentationInput::from_presentation)
        .unwrap_or_default();
    let vm = PresentationFormVm::new(initial);
    let original = StoredValue::new(presentation);
    let product_id = StoredValue::new(product_id);

    let save = move |_| {
        vm.error.set(None);
        vm.saving.set(true);
        let input = vm.form.get_untracked();
        spawn_local(async move {
            let client = ApiClient::new(session);
            let product_id = product_id.get_value();
            let result = match original.get_value() {
                Some(existing) => match input.apply_to(&existing) {
                    Ok(edited) => catalog.update_presentation(&client, &product_id, edited).await,
                    Err(e) => Err(e.into()),
                },
                None => match input.to_draft() {
                    Ok(draft) => catalog.add_presentation(&client, &product_id, draft).await,
                    Err(e) => Err(e.into()),
                },
            };
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
        <ModalFrame on_close=on_close modal_style="width: min(760px, 95vw);".to_string()>
            <Flex justify=FlexJustify::SpaceBetween align=FlexAlign::Center>
                <h3 style="margin: 0;">
                    {if is_edit { "Editar presentación" } else { "Nueva presentación" }}
                </h3>
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
            </Flex>

            {move || vm.error.get().map(|err| view! {
                <div style="padding: 8px 12px; margin: 10px 0; background: var(--color-error-50); border: 1px solid var(--color-error-100); border-radius: 6px; color: var(--color-error);">
                    {err}
                </div>
            })}

            <div style="margin-top: 12px;">
                <PresentationFields
                    value=vm.form
                    on_change=Callback::new(move |(field, text): (PresentationField, String)| vm.form.update(|f| f.set(field, text)))
                />
            </div>
        </ModalFrame>
    }
}
