//! Dashboard page against the stub's aggregated statistics.

use casita_azul_admin::pages::DashboardPage;
use casita_azul_client::DashboardClient;
use casita_azul_core::{CatalogItemId, Property, Role};
use casita_azul_integration_tests::StubApi;

fn listing(titulo: &str, visitas: i64, published: bool) -> Property {
    Property {
        titulo: titulo.to_string(),
        visitas: Some(visitas),
        estado_publicacion_id: published.then(|| CatalogItemId::new(1)),
        ..Property::default()
    }
}

#[tokio::test]
async fn test_dashboard_aggregates() {
    let stub = StubApi::start().await.unwrap();
    stub.seed_property(listing("Casa Azul 1", 120, true));
    stub.seed_property(listing("Loft centro", 45, true));
    stub.seed_property(listing("Borrador", 0, false));

    stub.seed_account("staff@casita-azul.com", "secret-password", Some(Role::User));
    let (api, session) = stub.session();
    session
        .login("staff@casita-azul.com", "secret-password")
        .await
        .unwrap();

    let mut page = DashboardPage::new(DashboardClient::new(api));
    assert!(!page.is_loaded());
    page.load().await.unwrap();
    assert!(page.is_loaded());

    let stats = page.stats();
    assert_eq!(stats.total_propiedades, 3);
    assert_eq!(stats.propiedades_publicadas, 2);
    assert_eq!(stats.total_visitas, 165);
    assert_eq!(
        stats.propiedad_mas_visitada.as_ref().map(|m| m.titulo.as_str()),
        Some("Casa Azul 1")
    );

    assert!((page.published_percentage() - 66.7).abs() < f64::EPSILON);
    // No listing has images yet.
    assert!((page.image_coverage_percentage() - 0.0).abs() < f64::EPSILON);
    assert_eq!(page.average_sale_price(), "N/A");

    // Recent activity lists the newest listings with formatted dates.
    let rows = page.recent_rows();
    assert_eq!(rows.len(), 3);
    assert_eq!(rows[0].titulo, "Borrador");
    assert_eq!(rows[0].fecha, "27/08/2026");
}
