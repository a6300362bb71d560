//! Dashboard command: the aggregated statistics in one screen.

use casita_azul_admin::{Route, pages::DashboardPage};

use super::{CliError, Context};

/// Print the dashboard.
pub async fn show(ctx: &Context) -> Result<(), CliError> {
    ctx.guard(Route::Dashboard)?;

    let mut page = DashboardPage::new(ctx.dashboard());
    page.load().await?;

    let stats = page.stats();
    println!("Listings:        {}", stats.total_propiedades);
    println!(
        "Published:       {} ({}%)",
        stats.propiedades_publicadas,
        page.published_percentage()
    );
    println!("Total visits:    {}", stats.total_visitas);
    println!("New this week:   {}", stats.propiedades_nuevas_semana);
    println!("Avg sale price:  {}", page.average_sale_price());
    println!("Avg rent price:  {}", page.average_rental_price());
    println!("Image coverage:  {}%", page.image_coverage_percentage());

    if let Some(top) = &stats.propiedad_mas_visitada {
        println!("Most visited:    {} ({} visits)", top.titulo, top.visitas);
    }

    if !stats.top_ciudades.is_empty() {
        println!("\nTop cities:");
        for city in &stats.top_ciudades {
            println!("  {:<24} {:>4}", city.ciudad, city.cantidad);
        }
    }

    if !stats.top_agentes.is_empty() {
        println!("\nTop agents:");
        for agent in &stats.top_agentes {
            println!("  {:<24} {:>4}", agent.nombre, agent.propiedades_captadas);
        }
    }

    if !page.recent_activity().is_empty() {
        println!("\nRecent activity:");
        for row in page.recent_rows() {
            println!("  {}  {:<32} {:<12} {}", row.fecha, row.titulo, row.estado, row.captado_por);
        }
    }
    Ok(())
}
