use linkboard_core::{
    Affordance, BoardView, CategoryOption, ColumnBody, ColumnView, FormController, LinkField,
};
use web_sys::{HtmlInputElement, HtmlSelectElement, InputEvent, MouseEvent, SubmitEvent};
use yew::{Callback, Html, Properties, TargetCast, classes, function_component, html};

#[derive(Properties, PartialEq)]
pub struct BoardColumnsProps {
    pub view: BoardView,
}

/// Columns only carry `data-affordance`/`data-id` attributes; the click
/// handler lives on the board container.
#[function_component(BoardColumns)]
pub fn board_columns(props: &BoardColumnsProps) -> Html {
    html! {
        <>
            {
                for props.view.columns.iter().map(|column| html! {
                    <CategoryColumn key={column.category_id.to_string()} column={column.clone()} />
                })
            }
        </>
    }
}

#[derive(Properties, PartialEq)]
pub struct CategoryColumnProps {
    pub column: ColumnView,
}

#[function_component(CategoryColumn)]
pub fn category_column(props: &CategoryColumnProps) -> Html {
    let column = &props.column;
    let category_id = column.category_id.to_string();

    html! {
        <section class="column">
            <div class="column-header">
                <h2>{ column.title.clone() }</h2>
                <button
                    type="button"
                    class="ghost"
                    data-affordance={Affordance::DeleteCategory.as_str()}
                    data-id={category_id}
                >
                    { "Delete" }
                </button>
            </div>
            {
                match &column.body {
                    ColumnBody::Placeholder(text) => html! {
                        <p class="column-empty">{ text.clone() }</p>
                    },
                    ColumnBody::Links(rows) => html! {
                        <ul class="link-list">
                            {
                                for rows.iter().map(|row| {
                                    let link_id = row.link_id.to_string();
                                    html! {
                                        <li key={link_id.clone()} class="link-row">
                                            <a
                                                href={row.href.clone()}
                                                title={row.title.clone()}
                                                target="_blank"
                                                rel="noopener noreferrer"
                                            >
                                                { row.label.clone() }
                                            </a>
                                            <span class="link-actions">
                                                <button
                                                    type="button"
                                                    data-affordance={Affordance::EditLink.as_str()}
                                                    data-id={link_id.clone()}
                                                >
                                                    { "Edit" }
                                                </button>
                                                <button
                                                    type="button"
                                                    class="ghost"
                                                    data-affordance={Affordance::DeleteLink.as_str()}
                                                    data-id={link_id}
                                                >
                                                    { "Delete" }
                                                </button>
                                            </span>
                                        </li>
                                    }
                                })
                            }
                        </ul>
                    },
                }
            }
        </section>
    }
}

#[derive(Properties, PartialEq)]
pub struct LinkFormProps {
    pub form: FormController,
    pub options: Vec<CategoryOption>,
    pub on_field: Callback<(LinkField, String)>,
    pub on_submit: Callback<()>,
    pub on_cancel: Callback<()>,
}

#[function_component(LinkForm)]
pub fn link_form(props: &LinkFormProps) -> Html {
    let fields = props.form.fields();
    let editing = props.form.edit_target().is_some();

    let text_input = |field: LinkField| {
        let on_field = props.on_field.clone();
        Callback::from(move |event: InputEvent| {
            let input: HtmlInputElement = event.target_unchecked_into();
            on_field.emit((field, input.value()));
        })
    };

    let on_category = {
        let on_field = props.on_field.clone();
        Callback::from(move |event: web_sys::Event| {
            let select: HtmlSelectElement = event.target_unchecked_into();
            on_field.emit((LinkField::Category, select.value()));
        })
    };

    let onsubmit = {
        let on_submit = props.on_submit.clone();
        Callback::from(move |event: SubmitEvent| {
            event.prevent_default();
            on_submit.emit(());
        })
    };

    let on_cancel = {
        let on_cancel = props.on_cancel.clone();
        Callback::from(move |_: MouseEvent| on_cancel.emit(()))
    };

    html! {
        <form class={classes!("panel", "link-form", editing.then_some("editing"))} {onsubmit}>
            <div class="header">{ if editing { "Edit link" } else { "New link" } }</div>
            <label>
                { "Name" }
                <input
                    type="text"
                    value={fields.name.clone()}
                    oninput={text_input(LinkField::Name)}
                />
            </label>
            <label>
                { "URL" }
                <input
                    type="url"
                    value={fields.url.clone()}
                    oninput={text_input(LinkField::Url)}
                />
            </label>
            <label>
                { "Category" }
                <select onchange={on_category}>
                    {
                        for props.options.iter().map(|option| html! {
                            <option
                                value={option.value.clone()}
                                selected={option.value == fields.category_id}
                            >
                                { option.label.clone() }
                            </option>
                        })
                    }
                </select>
            </label>
            <div class="form-actions">
                <button type="submit">
                    { props.form.submit_label() }
                </button>
                <button
                    type="button"
                    class="ghost"
                    hidden={!props.form.cancel_visible()}
                    onclick={on_cancel}
                >
                    { "Cancel" }
                </button>
            </div>
        </form>
    }
}

#[derive(Properties, PartialEq)]
pub struct CategoryFormProps {
    pub draft: String,
    pub on_input: Callback<String>,
    pub on_submit: Callback<()>,
}

#[function_component(CategoryForm)]
pub fn category_form(props: &CategoryFormProps) -> Html {
    let oninput = {
        let on_input = props.on_input.clone();
        Callback::from(move |event: InputEvent| {
            let input: HtmlInputElement = event.target_unchecked_into();
            on_input.emit(input.value());
        })
    };

    let onsubmit = {
        let on_submit = props.on_submit.clone();
        Callback::from(move |event: SubmitEvent| {
            event.prevent_default();
            on_submit.emit(());
        })
    };

    html! {
        <form class="panel category-form" {onsubmit}>
            <div class="header">{ "New category" }</div>
            <input
                type="text"
                placeholder="Category name"
                value={props.draft.clone()}
                {oninput}
            />
            <button type="submit">{ "Add Category" }</button>
        </form>
    }
}
