use portal_frontend::{App, logging};

fn main() {
    logging::init();
    yew::Renderer::<App>::new().render();
}
