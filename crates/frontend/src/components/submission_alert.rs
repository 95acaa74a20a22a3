use portal_core::SubmissionError;
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct SubmissionAlertProps {
    #[prop_or_default]
    pub error: Option<SubmissionError>,
}

/// Form-level error returned by the server, e.g. `Error 409`
#[function_component(SubmissionAlert)]
pub fn submission_alert(props: &SubmissionAlertProps) -> Html {
    match props.error {
        Some(error) => html! {
            <div role="alert" class="mb-4 px-3 py-2 bg-red-50 dark:bg-red-900 border border-red-200 dark:border-red-700 rounded-md text-sm text-red-700 dark:text-red-300">
                {error.to_string()}
            </div>
        },
        None => html! {},
    }
}
