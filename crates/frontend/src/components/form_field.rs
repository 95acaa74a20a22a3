//! Labelled input with an inline validation message

use crate::hooks::UseAuthFormHandle;
use portal_core::FieldName;
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct FormFieldProps {
    pub field: FieldName,
    pub label: AttrValue,
    #[prop_or(AttrValue::Static("text"))]
    pub input_type: AttrValue,
    pub value: AttrValue,
    /// Empty when there is nothing to show
    #[prop_or_default]
    pub error: AttrValue,
    pub oninput: Callback<InputEvent>,
    pub onblur: Callback<FocusEvent>,
}

#[function_component(FormField)]
pub fn form_field(props: &FormFieldProps) -> Html {
    let has_error = !props.error.is_empty();
    let input_class = classes!(
        "w-full",
        "px-3",
        "py-2",
        "border",
        "rounded-md",
        "dark:bg-gray-700",
        "dark:text-gray-200",
        "focus:outline-none",
        "focus:ring-2",
        if has_error {
            "border-red-500 focus:ring-red-500"
        } else {
            "border-gray-300 dark:border-gray-600 focus:ring-blue-500"
        },
    );

    html! {
        <div class="mb-4">
            <label for={props.field.as_str()} class="block text-sm font-medium text-gray-700 dark:text-gray-300 mb-2">
                {props.label.clone()}
            </label>
            <input
                id={props.field.as_str()}
                name={props.field.as_str()}
                type={props.input_type.clone()}
                class={input_class}
                value={props.value.clone()}
                oninput={props.oninput.clone()}
                onblur={props.onblur.clone()}
            />
            if has_error {
                <p class="mt-1 text-sm text-red-600 dark:text-red-400">{props.error.clone()}</p>
            }
        </div>
    }
}

/// [`FormField`] wired to the form hook
pub fn bound_field(
    form: &UseAuthFormHandle,
    field: FieldName,
    label: &'static str,
    input_type: &'static str,
) -> Html {
    let snapshot = form.snapshot();
    html! {
        <FormField
            {field}
            label={AttrValue::Static(label)}
            input_type={AttrValue::Static(input_type)}
            value={AttrValue::from(snapshot.value(field).to_string())}
            error={form.visible_error(field)}
            oninput={form.oninput(field)}
            onblur={form.onblur(field)}
        />
    }
}
