//! Centered card framing the authentication forms

use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct AuthCardProps {
    pub title: AttrValue,
    pub children: Children,
}

#[function_component(AuthCard)]
pub fn auth_card(props: &AuthCardProps) -> Html {
    html! {
        <div class="min-h-screen flex items-center justify-center px-4 bg-gray-50 dark:bg-gray-900">
            <div class="w-full max-w-[425px] bg-white dark:bg-gray-800 rounded-lg shadow-lg p-6">
                <h1 class="text-3xl font-extralight text-gray-800 dark:text-gray-200 mb-4">{props.title.clone()}</h1>
                {props.children.clone()}
            </div>
        </div>
    }
}
