use yew::prelude::*;
use yew_router::prelude::*;

use crate::router::Route;

#[function_component(NotFound)]
pub fn not_found() -> Html {
    html! {
        <div class="container">
            <div class="empty-state">
                <h2>{ "Nothing scheduled here" }</h2>
                <p>{ "This page does not exist." }</p>
                <Link<Route> to={Route::Home}>{ "Back to the planner" }</Link<Route>>
            </div>
        </div>
    }
}
