mod batch;
mod error;
mod fonts;
pub mod format;
mod invoice;
pub mod ledger;
pub mod model;
mod pdf;
pub mod roster;

pub use batch::{
    batch_report_filename, layout_batch, member_report_filename, render_batch, render_member,
};
pub use error::{Error, LayoutError};
pub use fonts::text_width;
pub use invoice::{Branding, InvoiceContext, placeholder_phone, render_invoice};
pub use ledger::{DerivedFields, MemberLedger};
pub use pdf::{Document, MM, PageSize, wave_band};

use std::path::{Path, PathBuf};
use std::time::Instant;

fn write_report(bytes: &[u8], out_dir: &Path, file_name: &str) -> Result<PathBuf, Error> {
    std::fs::create_dir_all(out_dir)?;
    let path = out_dir.join(file_name);
    std::fs::write(&path, bytes)?;
    Ok(path)
}

/// Render one member's invoice to `out_dir/Member_{account}_{name}.pdf`.
pub fn export_member_report(
    ledger: &MemberLedger,
    ctx: &InvoiceContext,
    out_dir: &Path,
) -> Result<PathBuf, Error> {
    let t0 = Instant::now();

    let bytes = render_member(ledger, ctx)?;
    let t_render = t0.elapsed();

    let path = write_report(&bytes, out_dir, &member_report_filename(ledger))?;
    let t_total = t0.elapsed();

    log::info!(
        "Timing: render={:.1}ms, write={:.1}ms, total={:.1}ms (output {} bytes)",
        t_render.as_secs_f64() * 1000.0,
        (t_total - t_render).as_secs_f64() * 1000.0,
        t_total.as_secs_f64() * 1000.0,
        bytes.len(),
    );

    Ok(path)
}

/// Render every ledger into one document at
/// `out_dir/All_Members_Report_{date}.pdf`.
pub fn export_all_members_report(
    ledgers: &[MemberLedger],
    ctx: &InvoiceContext,
    out_dir: &Path,
) -> Result<PathBuf, Error> {
    let t0 = Instant::now();

    let bytes = render_batch(ledgers, ctx)?;
    let t_render = t0.elapsed();

    let path = write_report(&bytes, out_dir, &batch_report_filename(ctx.issued_on))?;
    let t_total = t0.elapsed();

    log::info!(
        "Timing: members={}, render={:.1}ms, write={:.1}ms, total={:.1}ms (output {} bytes)",
        ledgers.len(),
        t_render.as_secs_f64() * 1000.0,
        (t_total - t_render).as_secs_f64() * 1000.0,
        t_total.as_secs_f64() * 1000.0,
        bytes.len(),
    );

    Ok(path)
}
