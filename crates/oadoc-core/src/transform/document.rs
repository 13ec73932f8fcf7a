use log::debug;

use super::operation::{
    OperationRef, build_operation_section, resolve_parameters, resolve_response, response_entry,
    security_block,
};
use super::parameters::group_parameters;
use super::section::Depth;
use super::{Context, TransformOptions, non_empty};
use crate::error::TransformError;
use crate::ir::*;
use crate::parse::document::{ApiDocument, ExternalDocs, Info, Tag};
use crate::parse::operation::BareOperation;
use crate::parse::server::Server;

const UNTITLED_API: &str = "Untitled API";
const UNTITLED_OPERATION: &str = "Untitled Operation";
const UNKNOWN_ID: &str = "unknown";
const UNKNOWN_OPERATION_SLUG: &str = "unknown-operation";

/// Build the overview page of a full API document: one root section holding
/// the API metadata and one section per declared tag, each listing the
/// operations carrying that tag.
pub fn build_overview_page(
    document: &ApiDocument,
    options: &TransformOptions,
) -> Result<PageContainer, TransformError> {
    let info = &document.info;
    let title = non_empty(info.title.as_deref()).unwrap_or(UNTITLED_API);
    debug!("building overview page for {title}");

    let page = Page {
        kind: PageKind::Overview,
        id: UNKNOWN_ID.to_string(),
        title: title.to_string(),
        slug: slugify(title),
    };

    let root_title = match non_empty(info.version.as_deref()) {
        Some(version) => format!("{title} ({version})"),
        None => title.to_string(),
    };

    let ctx = Context::for_document(document, options);
    let root = Depth::root().section(root_title, |depth| {
        let mut children = overview_blocks(document);
        for tag in &document.tags {
            children.push(tag_section(&ctx, document, tag, depth)?);
        }
        Ok::<_, TransformError>(children)
    })?;

    Ok(PageContainer {
        page,
        blocks: vec![root],
    })
}

/// Metadata, description, servers and external docs, each only when present.
fn overview_blocks(document: &ApiDocument) -> Vec<Block> {
    let mut blocks = Vec::new();

    blocks.extend(overview_meta(&document.info).map(Block::OverviewMeta));

    if let Some(description) = non_empty(document.info.description.as_deref()) {
        blocks.push(description_block(description));
    }

    if !document.servers.is_empty() {
        blocks.push(Block::Servers(ServerBlock {
            servers: document.servers.iter().map(server_entry).collect(),
        }));
    }

    blocks.extend(
        document
            .external_docs
            .as_ref()
            .and_then(external_docs_body)
            .map(|body| Block::OverviewDescription(Description { body })),
    );

    blocks
}

/// `None` when the info object has no contact email, license or terms of service.
fn overview_meta(info: &Info) -> Option<OverviewMeta> {
    let meta = OverviewMeta {
        email: info
            .contact
            .as_ref()
            .and_then(|c| non_empty(c.email.as_deref()))
            .map(str::to_string),
        license: info.license.as_ref().map(|license| LicenseInfo {
            name: license.name.clone().unwrap_or_default(),
            url: license.url.clone(),
        }),
        terms_of_service: non_empty(info.terms_of_service.as_deref()).map(str::to_string),
    };

    if meta == OverviewMeta::default() {
        None
    } else {
        Some(meta)
    }
}

fn server_entry(server: &Server) -> ServerEntry {
    ServerEntry {
        url: server.url.clone(),
        description: non_empty(server.description.as_deref()).map(str::to_string),
        variables: server
            .variables
            .iter()
            .map(|(name, variable)| {
                (
                    name.clone(),
                    ServerVariableEntry {
                        default: variable.default.clone(),
                        description: variable.description.clone(),
                        enum_values: variable.enum_values.clone(),
                    },
                )
            })
            .collect(),
    }
}

/// `"{description} ([link]({url}))"`, only when a description is given.
fn external_docs_body(docs: &ExternalDocs) -> Option<String> {
    let description = non_empty(docs.description.as_deref())?;
    let url = docs.url.as_deref().unwrap_or_default();
    Some(format!("{description} ([link]({url}))"))
}

fn description_block(body: &str) -> Block {
    Block::OverviewDescription(Description {
        body: body.to_string(),
    })
}

/// One tag's section: its description, its external docs, then every operation
/// tagged with it in path order, then method order.
fn tag_section(
    ctx: &Context<'_>,
    document: &ApiDocument,
    tag: &Tag,
    depth: Depth,
) -> Result<Block, TransformError> {
    depth.section(tag.name.clone(), |depth| {
        let mut children = Vec::new();

        if let Some(description) = non_empty(tag.description.as_deref()) {
            children.push(description_block(description));
        }
        if let Some(body) = tag.external_docs.as_ref().and_then(external_docs_body) {
            children.push(Block::OverviewDescription(Description { body }));
        }

        for (path, item) in &document.paths {
            for (method, operation) in item.operations() {
                if !operation.tags.contains(&tag.name) {
                    continue;
                }
                let op_ref = OperationRef {
                    path,
                    method,
                    operation,
                    path_parameters: &item.parameters,
                };
                children.push(build_operation_section(ctx, depth, op_ref)?);
            }
        }

        debug!("tag `{}`: {} blocks", tag.name, children.len());
        Ok(children)
    })
}

/// Build the page for a single bare operation. This path documents the header,
/// description, parameters, responses and security only; request bodies and
/// examples are not rendered here.
pub fn build_operation_page(
    bare: &BareOperation,
    options: &TransformOptions,
) -> Result<PageContainer, TransformError> {
    let op = &bare.operation;
    let summary = non_empty(op.summary.as_deref());
    let operation_id = non_empty(op.operation_id.as_deref());
    debug!(
        "building operation page for {}",
        operation_id.or(summary).unwrap_or(UNKNOWN_ID)
    );

    let page = Page {
        kind: PageKind::Operation,
        id: operation_id.or(summary).unwrap_or(UNKNOWN_ID).to_string(),
        title: summary.unwrap_or(UNTITLED_OPERATION).to_string(),
        slug: operation_id.unwrap_or(UNKNOWN_OPERATION_SLUG).to_string(),
    };

    let ctx = Context::detached(options);
    let mut blocks = vec![Block::OpHeader(OpHeader {
        title: summary.unwrap_or_default().to_string(),
        method: non_empty(bare.method.as_deref())
            .map(str::to_uppercase)
            .unwrap_or_else(|| "GET".to_string()),
        path: non_empty(bare.path.as_deref()).unwrap_or("/").to_string(),
        operation_id: operation_id.unwrap_or_default().to_string(),
    })];

    if let Some(description) = non_empty(op.description.as_deref()) {
        blocks.push(Block::OpDescription(Description {
            body: description.to_string(),
        }));
    }

    let parameters = resolve_parameters(&ctx, &op.parameters)?;
    if !parameters.is_empty() {
        blocks.push(Block::Parameters(group_parameters(&parameters)));
    }

    let responses = op
        .responses
        .iter()
        .map(|(status, response)| {
            resolve_response(&ctx, response).map(|response| response_entry(status, &response))
        })
        .collect::<Result<Vec<_>, _>>()?;
    if !responses.is_empty() {
        blocks.push(Block::Responses(ResponseBlock { responses }));
    }

    if let Some(ref security) = op.security {
        blocks.extend(security_block(&ctx, security));
    }

    Ok(PageContainer { page, blocks })
}
