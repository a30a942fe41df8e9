use yew::prelude::*;

/// Submit button with a spinner that replaces the label while loading.
#[derive(Properties, PartialEq)]
pub struct SubmitButtonProps {
    /// Label text, e.g. "Pay"
    pub label: String,
    /// Formatted order amount shown after the label
    #[prop_or_default]
    pub amount: Option<String>,
    /// Disable state
    #[prop_or_default]
    pub disabled: bool,
    /// Spinner visible, label hidden
    #[prop_or_default]
    pub loading: bool,
}

#[function_component(SubmitButton)]
pub fn submit_button(props: &SubmitButtonProps) -> Html {
    let spinner_hidden = (!props.loading).then_some("hidden");
    let text_hidden = props.loading.then_some("hidden");
    html! {
        <button id="submit" type="submit" disabled={props.disabled}>
            <div class={classes!("spinner", spinner_hidden)} id="spinner"></div>
            <span class={classes!(text_hidden)} id="button-text">
                { &props.label }
                { " " }
                <span id="order-amount">{ props.amount.clone().unwrap_or_default() }</span>
            </span>
        </button>
    }
}

#[derive(Properties, PartialEq)]
pub struct ErrorFieldProps {
    #[prop_or_default]
    pub message: Option<String>,
}

/// Inline error under the bank selector.
#[function_component(ErrorField)]
pub fn error_field(props: &ErrorFieldProps) -> Html {
    html! {
        <div class="sr-field-error" id="fpx-errors" role="alert">
            { props.message.clone().unwrap_or_default() }
        </div>
    }
}

#[derive(Properties, PartialEq)]
pub struct ResultPanelProps {
    /// Pretty-printed PaymentIntent; the panel is hidden until set
    #[prop_or_default]
    pub intent_json: Option<String>,
    #[prop_or_default]
    pub expanded: bool,
}

#[function_component(ResultPanel)]
pub fn result_panel(props: &ResultPanelProps) -> Html {
    let hidden = props.intent_json.is_none().then_some("hidden");
    let expand = props.expanded.then_some("expand");
    html! {
        <div class={classes!("sr-result", hidden, expand)}>
            <p>{ "Payment completed" }<br /></p>
            <pre>
                <code>{ props.intent_json.clone().unwrap_or_default() }</code>
            </pre>
        </div>
    }
}
