use std::future::Future;
use std::rc::Rc;

use linkboard_core::{
  Affordance,
  BoardClient,
  CatalogApi,
  ClientConfig,
  Failure,
  Intent,
  LinkField,
  TargetDescriptor,
  classify
};
use wasm_bindgen::JsCast;
use web_sys::{
  Element,
  MouseEvent
};
use yew::{
  Callback,
  Html,
  NodeRef,
  function_component,
  html,
  use_effect_with,
  use_force_update,
  use_memo,
  use_node_ref
};
use yew::functional::UseForceUpdateHandle;

use crate::api::GlooClient;
use crate::components::{
  BoardColumns,
  CategoryForm,
  LinkForm
};

const CONFIG_TOML: &str =
  include_str!("../assets/linkboard.toml");

type Board = BoardClient<GlooClient>;

fn load_config() -> ClientConfig {
  match ClientConfig::from_toml_str(
    CONFIG_TOML
  ) {
    | Ok(cfg) => {
      tracing::info!(
        api_base = %cfg.api_base,
        "loaded frontend config"
      );
      cfg
    }
    | Err(error) => {
      tracing::error!(%error, "failed to parse frontend config; using same-origin defaults");
      ClientConfig {
        api_base: String::new(),
        ..ClientConfig::default()
      }
    }
  }
}

/// Runs a board operation in the
/// background and redraws once it
/// settles, failed or not.
fn spawn_op<F>(
  redraw: UseForceUpdateHandle,
  op: &'static str,
  fut: F
) where
  F: Future<Output = Result<(), Failure>>
    + 'static
{
  wasm_bindgen_futures::spawn_local(
    async move {
      if let Err(error) = fut.await {
        tracing::warn!(op, %error, "board operation failed");
      }
      redraw.force_update();
    }
  );
}

/// Descriptors for the click target
/// and each ancestor, nearest first,
/// stopping below `container`.
fn descriptor_chain(
  target: Option<Element>,
  container: &Element
) -> Vec<TargetDescriptor> {
  let mut chain = Vec::new();
  let mut current = target;
  while let Some(element) = current {
    if element.is_same_node(Some(
      container
    )) {
      break;
    }
    chain.push(TargetDescriptor {
      kind: element.get_attribute(
        Affordance::KIND_ATTRIBUTE
      ),
      id:   element.get_attribute(
        Affordance::ID_ATTRIBUTE
      )
    });
    current = element.parent_element();
  }
  chain
}

#[function_component(App)]
pub fn app() -> Html {
  let board = use_memo((), |_| {
    let cfg = load_config();
    Board::new(CatalogApi::new(
      GlooClient,
      cfg.api_base
    ))
  });
  let redraw = use_force_update();
  let board_ref: NodeRef =
    use_node_ref();

  {
    let board = Rc::clone(&board);
    let redraw = redraw.clone();
    use_effect_with((), move |_| {
      tracing::debug!(
        "frontend mounted; loading board"
      );
      spawn_op(redraw, "load", async move {
        board.load().await
      });
      || ()
    });
  }

  let on_board_click = {
    let board = Rc::clone(&board);
    let redraw = redraw.clone();
    let board_ref = board_ref.clone();
    Callback::from(
      move |event: MouseEvent| {
        let Some(container) =
          board_ref.cast::<Element>()
        else {
          return;
        };
        let target = event
          .target()
          .and_then(|target| {
            target
              .dyn_into::<Element>()
              .ok()
          });
        let chain = descriptor_chain(
          target, &container
        );
        let intent = classify(&chain);
        if intent == Intent::None {
          return;
        }
        tracing::debug!(?intent, "board click");
        event.prevent_default();

        let board = Rc::clone(&board);
        spawn_op(
          redraw.clone(),
          "dispatch",
          async move {
            board.dispatch(intent).await
          }
        );
        redraw.force_update();
      }
    )
  };

  let on_field = {
    let board = Rc::clone(&board);
    let redraw = redraw.clone();
    Callback::from(
      move |(field, value): (
        LinkField,
        String
      )| {
        board.set_field(field, value);
        redraw.force_update();
      }
    )
  };

  let on_link_submit = {
    let board = Rc::clone(&board);
    let redraw = redraw.clone();
    Callback::from(move |()| {
      let board = Rc::clone(&board);
      spawn_op(
        redraw.clone(),
        "submit link",
        async move {
          board.submit_link().await
        }
      );
    })
  };

  let on_cancel = {
    let board = Rc::clone(&board);
    let redraw = redraw.clone();
    Callback::from(move |()| {
      board.cancel_edit();
      redraw.force_update();
    })
  };

  let on_category_input = {
    let board = Rc::clone(&board);
    let redraw = redraw.clone();
    Callback::from(
      move |value: String| {
        board.set_category_draft(value);
        redraw.force_update();
      }
    )
  };

  let on_category_submit = {
    let board = Rc::clone(&board);
    let redraw = redraw.clone();
    Callback::from(move |()| {
      let board = Rc::clone(&board);
      spawn_op(
        redraw.clone(),
        "create category",
        async move {
          let name =
            board.category_draft();
          board
            .create_category(&name)
            .await
        }
      );
    })
  };

  let message = board.message();

  html! {
      <div class="app">
          <header class="app-header">
              <h1>{ "Links" }</h1>
          </header>
          <div class="forms">
              <LinkForm
                  form={board.form()}
                  options={board.category_options()}
                  {on_field}
                  on_submit={on_link_submit}
                  {on_cancel}
              />
              <CategoryForm
                  draft={board.category_draft()}
                  on_input={on_category_input}
                  on_submit={on_category_submit}
              />
          </div>
          <p class="status" role="status" aria-live="polite">
              { message.unwrap_or_default() }
          </p>
          <div class="board" ref={board_ref} onclick={on_board_click}>
              <BoardColumns view={board.view()} />
          </div>
      </div>
  }
}
