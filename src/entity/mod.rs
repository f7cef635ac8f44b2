//! Entidades SeaORM
//!
//! Espelham as tabelas do banco e ficam separadas dos modelos de negócio em
//! `models`; a camada de storage converte entre os dois.

pub mod prelude;

pub mod agendamentos;
pub mod alunos_processos;
pub mod arquivos;
pub mod atualizacoes;
pub mod notificacoes;
pub mod processos;
pub mod professores_processos;
pub mod roles;
pub mod usuarios;

use chrono::{DateTime, Utc};

pub(crate) fn to_datetime(ts: i64) -> DateTime<Utc> {
    DateTime::<Utc>::from_timestamp(ts, 0).unwrap_or_default()
}
