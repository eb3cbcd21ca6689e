// Typed dispatch from an `EntityKind` to the matching wire type.

use std::sync::Arc;

use rickdex_api::{
    CatalogClient, CharacterResponse, EpisodeResponse, LocationResponse, PageEnvelope, PageMeta,
};

use crate::model::{Entity, EntityKind, ListResponse, PageInfo};
use crate::query::RequestParams;

fn into_page<T: Into<Entity>>(
    kind: EntityKind,
    envelope: PageEnvelope<T>,
    requested_page: u32,
) -> ListResponse {
    let meta: Option<PageMeta> = envelope.info;
    let items: Vec<Arc<Entity>> = envelope
        .results
        .into_iter()
        .map(|item| Arc::new(item.into()))
        .collect();
    let page_info = PageInfo::from_meta(meta.as_ref(), requested_page, items.len());
    ListResponse {
        kind,
        items,
        page_info,
    }
}

fn into_entities<T: Into<Entity>>(items: Vec<T>) -> Vec<Entity> {
    items.into_iter().map(Into::into).collect()
}

pub(crate) async fn fetch_list(
    client: &CatalogClient,
    kind: EntityKind,
    params: &RequestParams,
) -> Result<ListResponse, rickdex_api::Error> {
    let pairs = params.query_pairs();
    Ok(match kind {
        EntityKind::Character => {
            let page: PageEnvelope<CharacterResponse> = client.list(kind, &pairs).await?;
            into_page(kind, page, params.page)
        }
        EntityKind::Episode => {
            let page: PageEnvelope<EpisodeResponse> = client.list(kind, &pairs).await?;
            into_page(kind, page, params.page)
        }
        EntityKind::Location => {
            let page: PageEnvelope<LocationResponse> = client.list(kind, &pairs).await?;
            into_page(kind, page, params.page)
        }
    })
}

pub(crate) async fn fetch_many(
    client: &CatalogClient,
    kind: EntityKind,
    ids: &[u32],
) -> Result<Vec<Entity>, rickdex_api::Error> {
    Ok(match kind {
        EntityKind::Character => {
            into_entities(client.get_many::<CharacterResponse>(kind, ids).await?)
        }
        EntityKind::Episode => into_entities(client.get_many::<EpisodeResponse>(kind, ids).await?),
        EntityKind::Location => {
            into_entities(client.get_many::<LocationResponse>(kind, ids).await?)
        }
    })
}
