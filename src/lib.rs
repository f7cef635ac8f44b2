//! NPJ - backend do Núcleo de Prática Jurídica
//!
//! Processos, equipe, linha do tempo, arquivos, agendamentos sincronizados
//! com o Google Calendar e notificações, sobre Actix Web e SeaORM.
//!
//! # Módulos
//! - `cache`: cache de requisições (Moka/Redis)
//! - `calendar`: integração com o Google Calendar
//! - `config`: configuração em camadas
//! - `entity`: entidades SeaORM
//! - `errors`: erros internos
//! - `mailer`: e-mail das notificações
//! - `middlewares`: autenticação, perfis, acesso a processos e limite de requisições
//! - `models`: tipos da API
//! - `routes`: rotas HTTP
//! - `runtime`: subida e encerramento
//! - `services`: regras de negócio
//! - `storage`: persistência (SeaORM)
//! - `utils`: utilitários

pub mod cache;
pub mod calendar;
pub mod config;
pub mod entity;
pub mod errors;
pub mod mailer;
pub mod middlewares;
pub mod models;
pub mod routes;
pub mod runtime;
pub mod services;
pub mod storage;
pub mod utils;
