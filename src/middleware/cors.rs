//! Configuración de CORS

use tower_http::cors::CorsLayer;

/// CORS permisivo: la API se consume desde el frontend de admin y desde el
/// formulario público de solicitudes, ambos en orígenes propios.
pub fn create_cors_layer() -> CorsLayer {
    CorsLayer::very_permissive()
}
