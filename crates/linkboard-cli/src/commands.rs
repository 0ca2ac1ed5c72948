use anyhow::bail;
use linkboard_core::{BoardClient, BoardView, LinkField, RemoteClient, TextRenderer};
use tracing::{debug, info};

use crate::cli::Command;

#[tracing::instrument(skip(board, renderer))]
pub async fn dispatch<C: RemoteClient>(
    board: &BoardClient<C>,
    renderer: &TextRenderer,
    command: Command,
) -> anyhow::Result<()> {
    let view = execute(board, command).await?;
    renderer.print_board(&view)
}

/// Loads the board, applies `command` and returns the refreshed view.
pub async fn execute<C: RemoteClient>(
    board: &BoardClient<C>,
    command: Command,
) -> anyhow::Result<BoardView> {
    board.load().await?;

    match command {
        Command::Board => {
            debug!("printing board");
        }
        Command::AddCategory { name } => {
            board.set_category_draft(name.as_str());
            board.create_category(&name).await?;
        }
        Command::DeleteCategory { id } => {
            board.delete_category(id).await?;
        }
        Command::AddLink {
            name,
            url,
            category,
        } => {
            board.set_field(LinkField::Name, name);
            board.set_field(LinkField::Url, url);
            if let Some(category) = category {
                board.set_field(LinkField::Category, category.to_string());
            }
            board.submit_link().await?;
        }
        Command::EditLink {
            id,
            name,
            url,
            category,
        } => {
            if !board.begin_edit(id) {
                bail!("link {id} not found");
            }
            if let Some(name) = name {
                board.set_field(LinkField::Name, name);
            }
            if let Some(url) = url {
                board.set_field(LinkField::Url, url);
            }
            if let Some(category) = category {
                board.set_field(LinkField::Category, category.to_string());
            }
            board.submit_link().await?;
        }
        Command::DeleteLink { id } => {
            board.delete_link(id).await?;
        }
    }

    let view = board.view();
    info!(columns = view.columns.len(), "board ready");
    Ok(view)
}
