//! Plain-text rendering for CLI output.

use std::fmt::Write;

use pelakor_core::{DisposisiRecord, Laporan, StatusLaporan, TindakLanjutRecord, User};

/// Render a report list, one line per report.
pub fn render_laporan_list(reports: &[Laporan]) -> String {
    if reports.is_empty() {
        return "Tidak ada laporan.\n".to_string();
    }
    let mut output = String::new();
    for laporan in reports {
        let _ = writeln!(
            output,
            "#{} [{}] {} (oleh {}, {})",
            laporan.id_laporan,
            laporan.status_laporan.label(),
            laporan.judul_laporan,
            laporan.nama_pelapor(),
            laporan.created_at.format("%d/%m/%Y"),
        );
    }
    output
}

/// Render one report with its histories.
pub fn render_laporan_detail(
    laporan: &Laporan,
    lampiran_url: Option<&str>,
    disposisi: &[DisposisiRecord],
    tindak_lanjut: &[TindakLanjutRecord],
) -> String {
    let mut output = String::new();
    let _ = writeln!(output, "Laporan #{}", laporan.id_laporan);
    let _ = writeln!(output, "Judul: {}", laporan.judul_laporan);
    let _ = writeln!(output, "Status: {}", laporan.status_laporan.label());
    match laporan.kategori {
        Some(kategori) => {
            let _ = writeln!(output, "Kategori: {kategori}");
        }
        None => {
            let _ = writeln!(output, "Kategori: -");
        }
    }
    let _ = writeln!(output, "Pelapor: {} ({})", laporan.nama_pelapor(), laporan.nip_pelapor);
    let _ = writeln!(output, "Diajukan: {}", laporan.created_at.format("%d/%m/%Y %H:%M"));
    if let Some(updated) = laporan.updated_at {
        let _ = writeln!(output, "Diperbarui: {}", updated.format("%d/%m/%Y %H:%M"));
    }
    match lampiran_url {
        Some(url) => {
            let _ = writeln!(output, "Lampiran: {url}");
        }
        None => {
            let _ = writeln!(output, "Lampiran: tidak ada");
        }
    }
    let _ = writeln!(output, "Isi:");
    let _ = writeln!(output, "{}", laporan.isi_laporan);

    if disposisi.is_empty() {
        let _ = writeln!(output, "\nRiwayat disposisi: belum ada");
    } else {
        let _ = writeln!(output, "\nRiwayat disposisi:");
        for record in disposisi {
            let penanggung_jawab = record.penanggung_jawab.as_deref().unwrap_or("-");
            let _ = writeln!(
                output,
                "- {} | penanggung jawab: {} | {}",
                record.created_at.format("%d/%m/%Y %H:%M"),
                penanggung_jawab,
                record.catatan_disposisi,
            );
        }
    }

    if tindak_lanjut.is_empty() {
        let _ = writeln!(output, "\nRiwayat tindak lanjut: belum ada");
    } else {
        let _ = writeln!(output, "\nRiwayat tindak lanjut:");
        for record in tindak_lanjut {
            let penindak = record.penindak.as_deref().unwrap_or("-");
            let _ = writeln!(
                output,
                "- {} [{}] {} | oleh {}",
                record.created_at.format("%d/%m/%Y %H:%M"),
                record.status_tindak_lanjut,
                record.catatan_tindak_lanjut,
                penindak,
            );
        }
    }
    output
}

/// Render the user directory, one line per user.
pub fn render_users(users: &[User]) -> String {
    if users.is_empty() {
        return "Tidak ada pengguna.\n".to_string();
    }
    let mut output = String::new();
    for user in users {
        let unit = user.unit_kerja_display().unwrap_or_else(|| "-".to_string());
        let jabatan = user.jabatan.as_deref().unwrap_or("-");
        let _ = writeln!(
            output,
            "{} | {} | {} | {} | {}",
            user.nip, user.nama, user.role, jabatan, unit,
        );
    }
    output
}

/// Render one user profile.
pub fn render_profil(user: &User) -> String {
    let mut output = String::new();
    let _ = writeln!(output, "Nama: {}", user.nama);
    let _ = writeln!(output, "NIP: {}", user.nip);
    let _ = writeln!(output, "Email: {}", user.email.as_deref().unwrap_or("-"));
    let _ = writeln!(output, "Role: {}", user.role);
    let _ = writeln!(output, "Jabatan: {}", user.jabatan.as_deref().unwrap_or("-"));
    let _ = writeln!(
        output,
        "Unit kerja: {}",
        user.unit_kerja_display().unwrap_or_else(|| "-".to_string())
    );
    output
}

/// Count reports per lifecycle state, in pipeline order.
pub fn status_counts(reports: &[Laporan]) -> Vec<(StatusLaporan, usize)> {
    StatusLaporan::ALL
        .into_iter()
        .map(|status| {
            let count = reports
                .iter()
                .filter(|laporan| laporan.status_laporan == status)
                .count();
            (status, count)
        })
        .collect()
}

/// Render the executive status recap.
pub fn render_dasbor(reports: &[Laporan]) -> String {
    let mut output = String::new();
    let _ = writeln!(output, "Rekap status laporan");
    for (status, count) in status_counts(reports) {
        let _ = writeln!(output, "- {}: {}", status.label(), count);
    }
    let _ = writeln!(output, "Total: {}", reports.len());
    output
}
