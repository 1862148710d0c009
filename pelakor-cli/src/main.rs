#![deny(missing_docs)]
//! PELAKOR command-line interface.
//!
//! Role-scoped commands for submitting, dispositioning, following up, and
//! archiving reports against the PELAKOR backend. Every command loads the
//! stored session, checks the role permission table, and talks to the server
//! through the typed API client; the server stays the sole authority on
//! status transitions, so mutating commands re-fetch instead of guessing.

mod render;
mod session;

use std::path::PathBuf;
use std::str::FromStr;

use chrono::NaiveDate;
use clap::{ArgGroup, Args, Parser, Subcommand, ValueEnum};

use pelakor_client::ApiClient;
use pelakor_core::{
    DisposisiDecision, ExportFormat, ExportOptions, Kategori, Laporan, LaporanDraft,
    LaporanPerubahan, Periode, Role, StatusTindakLanjut, TindakLanjutDraft, UserDraft, UserUpdate,
    export_archive,
};

use session::StoredSession;

pub(crate) type CliResult<T> = Result<T, Box<dyn std::error::Error + Send + Sync>>;

const DEFAULT_SERVER_URL: &str = "http://127.0.0.1:3000";

#[derive(Parser)]
#[command(name = "pelakor", version, about = "PELAKOR CLI")]
struct Cli {
    #[command(flatten)]
    global: GlobalArgs,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Args, Clone)]
struct GlobalArgs {
    /// Base URL of the PELAKOR backend.
    #[arg(long, env = "PELAKOR_API_URL", default_value = DEFAULT_SERVER_URL, global = true)]
    server_url: String,
    /// Override the session file path.
    #[arg(long, global = true)]
    auth_path: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Masuk dan simpan sesi.
    Login(LoginArgs),
    /// Hapus sesi tersimpan.
    Logout,
    /// Tampilkan profil pengguna yang sedang masuk.
    Profil,
    /// Kelola laporan.
    Laporan {
        #[command(subcommand)]
        command: LaporanCommands,
    },
    /// Putuskan disposisi laporan masuk.
    Disposisi {
        #[command(subcommand)]
        command: DisposisiCommands,
    },
    /// Tindak lanjuti laporan yang didisposisikan.
    #[command(name = "tindak-lanjut")]
    TindakLanjut {
        #[command(subcommand)]
        command: TindakLanjutCommands,
    },
    /// Arsip laporan selesai.
    Arsip {
        #[command(subcommand)]
        command: ArsipCommands,
    },
    /// Kelola direktori pengguna.
    Pengguna {
        #[command(subcommand)]
        command: PenggunaCommands,
    },
    /// Rekap status laporan untuk pimpinan.
    Dasbor,
}

#[derive(Args, Clone)]
struct LoginArgs {
    /// NIP atau email.
    #[arg(long)]
    identifier: String,
    /// Kata sandi.
    #[arg(long, env = "PELAKOR_PASSWORD")]
    password: String,
}

#[derive(Subcommand)]
enum LaporanCommands {
    /// Kirim laporan baru.
    Kirim(LaporanKirimArgs),
    /// Daftar laporan yang terlihat oleh peran Anda.
    Daftar,
    /// Rincian satu laporan beserta riwayatnya.
    Detail {
        /// ID laporan.
        id: i64,
    },
    /// Ubah laporan yang masih berstatus diajukan.
    Ubah(LaporanUbahArgs),
    /// Hapus laporan yang masih berstatus diajukan.
    Hapus {
        /// ID laporan.
        id: i64,
    },
}

#[derive(Args, Clone)]
struct LaporanKirimArgs {
    /// Judul laporan (maksimal 100 karakter).
    #[arg(long)]
    judul: String,
    /// Isi laporan.
    #[arg(long)]
    isi: String,
    /// Kategori: konsumsi, kebutuhan, kerusakan, atau lainnya.
    #[arg(long)]
    kategori: Option<String>,
    /// Jalur berkas lampiran.
    #[arg(long)]
    lampiran: Option<PathBuf>,
}

#[derive(Args, Clone)]
struct LaporanUbahArgs {
    /// ID laporan.
    id: i64,
    /// Judul baru.
    #[arg(long)]
    judul: String,
    /// Isi baru.
    #[arg(long)]
    isi: String,
    /// Kategori baru.
    #[arg(long)]
    kategori: Option<String>,
}

#[derive(Subcommand)]
enum DisposisiCommands {
    /// Laporan yang menunggu disposisi.
    Daftar,
    /// Riwayat disposisi sebuah laporan.
    Riwayat {
        /// ID laporan.
        laporan_id: i64,
    },
    /// Setujui atau tolak sebuah laporan.
    Putuskan(PutuskanArgs),
}

#[derive(Args, Clone)]
#[command(group(
    ArgGroup::new("keputusan")
        .required(true)
        .args(&["terima", "tolak"])
))]
struct PutuskanArgs {
    /// ID laporan.
    laporan_id: i64,
    /// Setujui dan teruskan ke penanggung jawab.
    #[arg(long)]
    terima: bool,
    /// Tolak laporan.
    #[arg(long)]
    tolak: bool,
    /// NIP penanggung jawab, wajib saat menerima.
    #[arg(long)]
    penanggung_jawab: Option<String>,
    /// Catatan disposisi, wajib untuk kedua keputusan.
    #[arg(long)]
    catatan: String,
}

#[derive(Subcommand)]
enum TindakLanjutCommands {
    /// Laporan yang ditugaskan kepada Anda.
    Daftar,
    /// Riwayat tindak lanjut sebuah laporan.
    Riwayat {
        /// ID laporan.
        laporan_id: i64,
    },
    /// Kirim tindak lanjut untuk sebuah laporan.
    Kirim(TindakLanjutKirimArgs),
    /// Ubah catatan atau status sebuah tindak lanjut.
    Ubah(TindakLanjutUbahArgs),
    /// Hapus sebuah tindak lanjut.
    Hapus {
        /// ID tindak lanjut.
        id: i64,
    },
}

#[derive(Args, Clone)]
struct TindakLanjutKirimArgs {
    /// ID laporan.
    laporan_id: i64,
    /// Catatan tindak lanjut, wajib.
    #[arg(long)]
    catatan: String,
    /// Status baru: ditindaklanjuti, selesai, atau ditolak.
    #[arg(long)]
    status: String,
    /// Jalur berkas lampiran.
    #[arg(long)]
    lampiran: Option<PathBuf>,
}

#[derive(Args, Clone)]
struct TindakLanjutUbahArgs {
    /// ID tindak lanjut.
    id: i64,
    /// Catatan pengganti.
    #[arg(long)]
    catatan: String,
    /// Status pengganti.
    #[arg(long)]
    status: String,
}

#[derive(Subcommand)]
enum ArsipCommands {
    /// Daftar laporan selesai.
    Daftar(ArsipFilterArgs),
    /// Ekspor arsip ke PDF atau HTML.
    Ekspor(ArsipEksporArgs),
}

#[derive(Args, Clone)]
struct ArsipFilterArgs {
    /// Tanggal mulai (YYYY-MM-DD).
    #[arg(long)]
    mulai: Option<String>,
    /// Tanggal akhir (YYYY-MM-DD).
    #[arg(long)]
    selesai: Option<String>,
}

#[derive(Args, Clone)]
struct ArsipEksporArgs {
    #[command(flatten)]
    filter: ArsipFilterArgs,
    /// Format keluaran.
    #[arg(long, value_enum, default_value_t = FormatArg::Pdf)]
    format: FormatArg,
    /// Berkas logo PNG untuk kop dokumen.
    #[arg(long)]
    logo: Option<PathBuf>,
    /// Tulis hasil ke jalur ini alih-alih nama bawaan.
    #[arg(long)]
    keluaran: Option<PathBuf>,
}

#[derive(ValueEnum, Copy, Clone, Debug, Eq, PartialEq)]
enum FormatArg {
    Pdf,
    Html,
}

impl From<FormatArg> for ExportFormat {
    fn from(value: FormatArg) -> Self {
        match value {
            FormatArg::Pdf => ExportFormat::Pdf,
            FormatArg::Html => ExportFormat::Html,
        }
    }
}

#[derive(Subcommand)]
enum PenggunaCommands {
    /// Daftar pengguna, dapat difilter per peran atau unit kerja.
    Daftar(PenggunaFilterArgs),
    /// Buat pengguna baru.
    Buat(PenggunaBuatArgs),
    /// Ubah data pengguna; NIP tidak dapat diganti.
    Ubah(PenggunaUbahArgs),
    /// Hapus pengguna.
    Hapus {
        /// NIP pengguna.
        nip: String,
    },
}

#[derive(Args, Clone)]
struct PenggunaFilterArgs {
    /// Filter per peran.
    #[arg(long)]
    role: Option<String>,
    /// Filter per unit kerja.
    #[arg(long)]
    unit_kerja: Option<String>,
}

#[derive(Args, Clone)]
struct PenggunaBuatArgs {
    /// Nama lengkap.
    #[arg(long)]
    nama: String,
    /// NIP, tidak dapat diubah setelah dibuat.
    #[arg(long)]
    nip: String,
    /// Alamat email.
    #[arg(long)]
    email: String,
    /// Kata sandi awal.
    #[arg(long)]
    password: String,
    /// Peran pengguna.
    #[arg(long)]
    role: String,
    /// Jabatan.
    #[arg(long)]
    jabatan: Option<String>,
    /// Unit kerja.
    #[arg(long)]
    unit_kerja: Option<String>,
}

#[derive(Args, Clone)]
struct PenggunaUbahArgs {
    /// NIP pengguna yang diubah.
    nip: String,
    /// Nama lengkap.
    #[arg(long)]
    nama: String,
    /// Alamat email.
    #[arg(long)]
    email: String,
    /// Peran pengguna.
    #[arg(long)]
    role: String,
    /// Kata sandi baru, hanya bila diganti.
    #[arg(long)]
    password: Option<String>,
    /// Jabatan.
    #[arg(long)]
    jabatan: Option<String>,
    /// Unit kerja.
    #[arg(long)]
    unit_kerja: Option<String>,
}

#[cfg(not(test))]
#[tokio::main]
async fn main() -> CliResult<()> {
    dotenvy::dotenv().ok();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();
    run(cli).await
}

#[cfg(test)]
fn main() {}

async fn run(cli: Cli) -> CliResult<()> {
    match cli.command {
        Commands::Login(args) => run_login(&cli.global, args).await,
        Commands::Logout => run_logout(&cli.global).await,
        Commands::Profil => run_profil(&cli.global).await,
        Commands::Laporan { command } => run_laporan(&cli.global, command).await,
        Commands::Disposisi { command } => run_disposisi(&cli.global, command).await,
        Commands::TindakLanjut { command } => run_tindak_lanjut(&cli.global, command).await,
        Commands::Arsip { command } => run_arsip(&cli.global, command).await,
        Commands::Pengguna { command } => run_pengguna(&cli.global, command).await,
        Commands::Dasbor => run_dasbor(&cli.global).await,
    }
}

/// Load the stored session and build an authenticated client from it.
async fn open_session(global: &GlobalArgs) -> CliResult<(StoredSession, ApiClient)> {
    let path = session::session_store_path(global.auth_path.clone())?;
    let stored = session::load_session(&path).await?;
    log::debug!("sesi dimuat untuk {} ({})", stored.user.nip, stored.user.role);
    let client = ApiClient::new(&stored.server_url)?.with_token(stored.token.clone());
    Ok((stored, client))
}

/// Refuse a command the role permission table does not allow.
fn require(allowed: bool, role: Role, action: &str) -> CliResult<()> {
    if allowed {
        Ok(())
    } else {
        Err(format!("peran {role} tidak berwenang untuk {action}").into())
    }
}

async fn run_login(global: &GlobalArgs, args: LoginArgs) -> CliResult<()> {
    let client = ApiClient::new(&global.server_url)?;
    let response = client.login(&args.identifier, &args.password).await?;
    if !response.success {
        return Err("login ditolak oleh server".into());
    }
    let path = session::session_store_path(global.auth_path.clone())?;
    let stored = StoredSession::new(client.base_url(), &response.token, response.user);
    session::write_session(&path, &stored).await?;
    println!(
        "Login berhasil sebagai {} ({}). Sesi disimpan di {}.",
        stored.user.nama,
        stored.user.role,
        path.display()
    );
    Ok(())
}

async fn run_logout(global: &GlobalArgs) -> CliResult<()> {
    let path = session::session_store_path(global.auth_path.clone())?;
    if session::remove_session(&path).await? {
        println!("Sesi dihapus.");
    } else {
        println!("Tidak ada sesi tersimpan.");
    }
    Ok(())
}

async fn run_profil(global: &GlobalArgs) -> CliResult<()> {
    let (_, client) = open_session(global).await?;
    let user = client.me().await?;
    print!("{}", render::render_profil(&user));
    Ok(())
}

async fn run_laporan(global: &GlobalArgs, command: LaporanCommands) -> CliResult<()> {
    let (stored, client) = open_session(global).await?;
    let role = stored.user.role;
    match command {
        LaporanCommands::Kirim(args) => {
            require(role.can_submit(), role, "mengirim laporan")?;
            let kategori = parse_kategori(args.kategori.as_deref())?;
            let draft = LaporanDraft::new(args.judul, args.isi, kategori, args.lampiran)?;
            let response = client.laporan_create(&draft).await?;
            println!("{}", response.message_or("Laporan terkirim."));
        }
        LaporanCommands::Daftar => {
            let reports = client.laporan_list().await?;
            print!("{}", render::render_laporan_list(&reports));
        }
        LaporanCommands::Detail { id } => {
            let laporan = client.laporan_detail(id).await?;
            let (disposisi, tindak_lanjut) = tokio::try_join!(
                client.disposisi_history(id),
                client.tindak_lanjut_history(id)
            )?;
            let lampiran_url = client.file_url(laporan.lampiran.as_deref());
            print!(
                "{}",
                render::render_laporan_detail(
                    &laporan,
                    lampiran_url.as_deref(),
                    &disposisi,
                    &tindak_lanjut,
                )
            );
        }
        LaporanCommands::Ubah(args) => {
            require(role.can_submit(), role, "mengubah laporan")?;
            let laporan = client.laporan_detail(args.id).await?;
            ensure_editable(&laporan, &stored.user.nip)?;
            let kategori = parse_kategori(args.kategori.as_deref())?;
            let perubahan = LaporanPerubahan::new(args.judul, args.isi, kategori)?;
            let response = client.laporan_update(args.id, &perubahan).await?;
            println!("{}", response.message_or("Laporan diperbarui."));
        }
        LaporanCommands::Hapus { id } => {
            require(role.can_submit(), role, "menghapus laporan")?;
            let laporan = client.laporan_detail(id).await?;
            ensure_editable(&laporan, &stored.user.nip)?;
            let response = client.laporan_delete(id).await?;
            println!("{}", response.message_or("Laporan dihapus."));
        }
    }
    Ok(())
}

/// A report may be edited or deleted only by its submitter and only while it
/// is still `diajukan`.
fn ensure_editable(laporan: &Laporan, nip: &str) -> CliResult<()> {
    if laporan.nip_pelapor != nip {
        return Err("hanya pelapor asli yang dapat mengubah laporan ini".into());
    }
    if !laporan.status_laporan.allows_edit() {
        return Err(format!(
            "laporan berstatus {} tidak dapat diubah atau dihapus",
            laporan.status_laporan
        )
        .into());
    }
    Ok(())
}

async fn run_disposisi(global: &GlobalArgs, command: DisposisiCommands) -> CliResult<()> {
    let (stored, client) = open_session(global).await?;
    let role = stored.user.role;
    require(role.can_disposition(), role, "mengelola disposisi")?;
    match command {
        DisposisiCommands::Daftar => {
            let reports = client.disposisi_queue().await?;
            print!("{}", render::render_laporan_list(&reports));
        }
        DisposisiCommands::Riwayat { laporan_id } => {
            let laporan = client.laporan_detail(laporan_id).await?;
            let history = client.disposisi_history(laporan_id).await?;
            print!(
                "{}",
                render::render_laporan_detail(&laporan, None, &history, &[])
            );
        }
        DisposisiCommands::Putuskan(args) => {
            let decision = match (args.terima, args.tolak) {
                (true, _) => {
                    let penanggung_jawab = args
                        .penanggung_jawab
                        .ok_or("--penanggung-jawab wajib diisi saat menerima laporan")?;
                    DisposisiDecision::approve(penanggung_jawab, args.catatan)?
                }
                _ => DisposisiDecision::reject(args.catatan)?,
            };
            let response = client.disposisi_submit(args.laporan_id, &decision).await?;
            println!("{}", response.message_or("Disposisi tersimpan."));
            // The server decides the resulting status; read it back.
            let laporan = client.laporan_detail(args.laporan_id).await?;
            println!("Status laporan sekarang: {}", laporan.status_laporan.label());
        }
    }
    Ok(())
}

async fn run_tindak_lanjut(global: &GlobalArgs, command: TindakLanjutCommands) -> CliResult<()> {
    let (stored, client) = open_session(global).await?;
    let role = stored.user.role;
    require(role.can_follow_up(), role, "mengelola tindak lanjut")?;
    match command {
        TindakLanjutCommands::Daftar => {
            let reports = client.tindak_lanjut_queue().await?;
            print!("{}", render::render_laporan_list(&reports));
        }
        TindakLanjutCommands::Riwayat { laporan_id } => {
            let laporan = client.laporan_detail(laporan_id).await?;
            let history = client.tindak_lanjut_history(laporan_id).await?;
            print!(
                "{}",
                render::render_laporan_detail(&laporan, None, &[], &history)
            );
        }
        TindakLanjutCommands::Kirim(args) => {
            let status = parse_status_tindak_lanjut(&args.status)?;
            let draft = TindakLanjutDraft::new(args.catatan, status, args.lampiran)?;
            let response = client.tindak_lanjut_submit(args.laporan_id, &draft).await?;
            println!("{}", response.message_or("Tindak lanjut tersimpan."));
            // The server decides the resulting status; read it back.
            let laporan = client.laporan_detail(args.laporan_id).await?;
            println!("Status laporan sekarang: {}", laporan.status_laporan.label());
        }
        TindakLanjutCommands::Ubah(args) => {
            let status = parse_status_tindak_lanjut(&args.status)?;
            let draft = TindakLanjutDraft::new(args.catatan, status, None)?;
            let response = client.tindak_lanjut_update(args.id, &draft).await?;
            println!("{}", response.message_or("Tindak lanjut diperbarui."));
        }
        TindakLanjutCommands::Hapus { id } => {
            let response = client.tindak_lanjut_delete(id).await?;
            println!("{}", response.message_or("Tindak lanjut dihapus."));
        }
    }
    Ok(())
}

async fn run_arsip(global: &GlobalArgs, command: ArsipCommands) -> CliResult<()> {
    let (_, client) = open_session(global).await?;
    match command {
        ArsipCommands::Daftar(filter) => {
            let periode = parse_periode(filter.mulai.as_deref(), filter.selesai.as_deref())?;
            let reports = client.arsip_selesai(periode.as_ref()).await?;
            print!("{}", render::render_laporan_list(&reports));
        }
        ArsipCommands::Ekspor(args) => {
            let periode =
                parse_periode(args.filter.mulai.as_deref(), args.filter.selesai.as_deref())?;
            let reports = client.arsip_selesai(periode.as_ref()).await?;
            if reports.is_empty() {
                println!("Tidak ada data laporan untuk periode tersebut.");
                return Ok(());
            }
            let options = ExportOptions { logo: args.logo, periode };
            let file = export_archive(&reports, args.format.into(), &options)?;
            let path = args.keluaran.unwrap_or_else(|| PathBuf::from(&file.file_name));
            if let Some(parent) = path.parent() {
                if !parent.as_os_str().is_empty() {
                    tokio::fs::create_dir_all(parent).await?;
                }
            }
            tokio::fs::write(&path, &file.contents).await?;
            println!("Arsip {} laporan tersimpan di {}.", reports.len(), path.display());
        }
    }
    Ok(())
}

async fn run_pengguna(global: &GlobalArgs, command: PenggunaCommands) -> CliResult<()> {
    let (stored, client) = open_session(global).await?;
    let role = stored.user.role;
    require(role.can_manage_users(), role, "mengelola pengguna")?;
    match command {
        PenggunaCommands::Daftar(filter) => {
            let role_filter = filter.role.as_deref().map(parse_role).transpose()?;
            let users = client
                .users_list(role_filter, filter.unit_kerja.as_deref())
                .await?;
            print!("{}", render::render_users(&users));
        }
        PenggunaCommands::Buat(args) => {
            let draft = UserDraft::new(
                args.nama,
                args.nip,
                args.email,
                args.password,
                parse_role(&args.role)?,
                args.jabatan,
                args.unit_kerja,
            )?;
            let response = client.user_create(&draft).await?;
            println!("{}", response.message_or("Pengguna dibuat."));
        }
        PenggunaCommands::Ubah(args) => {
            let update = UserUpdate::new(
                args.nama,
                args.email,
                parse_role(&args.role)?,
                args.password,
                args.jabatan,
                args.unit_kerja,
            )?;
            let response = client.user_update(&args.nip, &update).await?;
            println!("{}", response.message_or("Pengguna diperbarui."));
        }
        PenggunaCommands::Hapus { nip } => {
            let response = client.user_delete(&nip).await?;
            println!("{}", response.message_or("Pengguna dihapus."));
        }
    }
    Ok(())
}

async fn run_dasbor(global: &GlobalArgs) -> CliResult<()> {
    let (stored, client) = open_session(global).await?;
    let role = stored.user.role;
    require(role.is_executive(), role, "melihat rekap pimpinan")?;
    let reports = client.laporan_list().await?;
    print!("{}", render::render_dasbor(&reports));
    Ok(())
}

fn parse_kategori(value: Option<&str>) -> CliResult<Option<Kategori>> {
    value
        .map(Kategori::from_str)
        .transpose()
        .map_err(Into::into)
}

fn parse_role(value: &str) -> CliResult<Role> {
    Role::from_str(value).map_err(Into::into)
}

fn parse_status_tindak_lanjut(value: &str) -> CliResult<StatusTindakLanjut> {
    StatusTindakLanjut::from_str(value).map_err(Into::into)
}

fn parse_tanggal(value: &str) -> CliResult<NaiveDate> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .map_err(|_| format!("tanggal tidak valid: {value} (format YYYY-MM-DD)").into())
}

/// Date filters come as a pair or not at all.
fn parse_periode(mulai: Option<&str>, selesai: Option<&str>) -> CliResult<Option<Periode>> {
    match (mulai, selesai) {
        (None, None) => Ok(None),
        (Some(mulai), Some(selesai)) => {
            Ok(Some(Periode::new(parse_tanggal(mulai)?, parse_tanggal(selesai)?)?))
        }
        _ => Err("tanggal mulai dan tanggal akhir harus diisi bersama".into()),
    }
}

#[cfg(test)]
mod tests {
    use super::{
        Cli, FormatArg, ensure_editable, parse_kategori, parse_periode, parse_role,
        parse_status_tindak_lanjut, parse_tanggal, require,
    };
    use chrono::{TimeZone, Utc};
    use clap::CommandFactory;
    use pelakor_core::{ExportFormat, Kategori, Laporan, Role, StatusLaporan, StatusTindakLanjut};

    fn sample_laporan(status: StatusLaporan, nip: &str) -> Laporan {
        Laporan {
            id_laporan: 1,
            judul_laporan: "Kerusakan AC".to_string(),
            isi_laporan: "AC rusak".to_string(),
            kategori: None,
            lampiran: None,
            status_laporan: status,
            nip_pelapor: nip.to_string(),
            pelapor: None,
            created_at: Utc.with_ymd_and_hms(2024, 1, 15, 8, 0, 0).unwrap(),
            updated_at: None,
        }
    }

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn kategori_parses_or_rejects() {
        assert_eq!(parse_kategori(None).expect("none"), None);
        assert_eq!(
            parse_kategori(Some("kerusakan")).expect("some"),
            Some(Kategori::Kerusakan)
        );
        assert!(parse_kategori(Some("bencana")).is_err());
    }

    #[test]
    fn role_and_status_parse_wire_strings() {
        assert_eq!(parse_role("subbag_umum").expect("role"), Role::SubbagUmum);
        assert!(parse_role("admin").is_err());
        assert_eq!(
            parse_status_tindak_lanjut("selesai").expect("status"),
            StatusTindakLanjut::Selesai
        );
        assert!(parse_status_tindak_lanjut("diajukan").is_err());
    }

    #[test]
    fn tanggal_requires_iso_format() {
        assert!(parse_tanggal("2024-01-31").is_ok());
        assert!(parse_tanggal("31/01/2024").is_err());
    }

    #[test]
    fn periode_needs_both_ends() {
        assert!(parse_periode(None, None).expect("none").is_none());
        assert!(parse_periode(Some("2024-01-01"), Some("2024-01-31")).expect("both").is_some());
        assert!(parse_periode(Some("2024-01-01"), None).is_err());
        assert!(parse_periode(None, Some("2024-01-31")).is_err());
        assert!(parse_periode(Some("2024-01-31"), Some("2024-01-01")).is_err());
    }

    #[test]
    fn require_refuses_disallowed_roles() {
        assert!(require(true, Role::Pegawai, "mengirim laporan").is_ok());
        let err = require(false, Role::Bupati, "mengirim laporan").unwrap_err();
        assert!(err.to_string().contains("bupati"));
    }

    #[test]
    fn editable_gate_checks_owner_and_status() {
        let ok = sample_laporan(StatusLaporan::Diajukan, "12345");
        assert!(ensure_editable(&ok, "12345").is_ok());

        let wrong_owner = sample_laporan(StatusLaporan::Diajukan, "99999");
        assert!(ensure_editable(&wrong_owner, "12345").is_err());

        for status in [
            StatusLaporan::Diproses,
            StatusLaporan::Ditindaklanjuti,
            StatusLaporan::Selesai,
            StatusLaporan::Ditolak,
        ] {
            let locked = sample_laporan(status, "12345");
            assert!(ensure_editable(&locked, "12345").is_err());
        }
    }

    #[test]
    fn format_arg_maps_to_export_format() {
        assert_eq!(ExportFormat::from(FormatArg::Pdf), ExportFormat::Pdf);
        assert_eq!(ExportFormat::from(FormatArg::Html), ExportFormat::Html);
    }
}
