use super::{PageLink, carried_query};
use crate::app::Route;
use crate::components::{AuthCard, SubmissionAlert, bound_field};
use crate::hooks::use_auth_form;
use portal_core::{FieldName, FormKind};
use yew::prelude::*;

#[function_component(SignUpPage)]
pub fn sign_up_page() -> Html {
    let form = use_auth_form(FormKind::SignUp);
    let submitting = form.is_submitting();
    let disabled = submitting || !form.snapshot().is_valid();

    html! {
        <AuthCard title="Sign Up">
            <form onsubmit={form.onsubmit()} novalidate={true}>
                {bound_field(&form, FieldName::Email, "Email", "email")}
                {bound_field(&form, FieldName::Password, "Password", "password")}
                {bound_field(&form, FieldName::ConfirmPassword, "Confirm Password", "password")}
                <SubmissionAlert error={form.submission_error()} />
                <button
                    type="submit"
                    {disabled}
                    class="w-full px-4 py-2 bg-blue-600 text-white rounded-md hover:bg-blue-700 disabled:opacity-50 disabled:cursor-not-allowed transition-colors"
                >
                    { if submitting { "Creating account..." } else { "Create Account" } }
                </button>
            </form>
            <p class="mt-4 text-sm text-center text-gray-600 dark:text-gray-400">
                {"Already have an account? "}
                <PageLink to={Route::Login} query={carried_query()} classes="text-blue-600 hover:underline">
                    {"Log in"}
                </PageLink>
            </p>
        </AuthCard>
    }
}
