use utoipa::OpenApi;

use crate::application::http::{
    label_scan::router::LabelScanApiDoc,
    server::config::{__path_get_config, ConfigResponse},
};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "VegScan API"
    ),
    paths(get_config),
    components(schemas(ConfigResponse)),
    nest(
        (path = "/api", api = LabelScanApiDoc),
    )
)]
pub struct ApiDoc;
