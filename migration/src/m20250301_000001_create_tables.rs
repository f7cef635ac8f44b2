use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Tabela de perfis de acesso
        manager
            .create_table(
                Table::create()
                    .table(Roles::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Roles::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Roles::Name).string().not_null().unique_key())
                    .col(ColumnDef::new(Roles::Description).string().null())
                    .to_owned(),
            )
            .await?;

        // Tabela de usuários
        manager
            .create_table(
                Table::create()
                    .table(Usuarios::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Usuarios::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Usuarios::Name).string().not_null())
                    .col(
                        ColumnDef::new(Usuarios::Email)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Usuarios::PasswordHash).string().not_null())
                    .col(ColumnDef::new(Usuarios::Phone).string().null())
                    .col(ColumnDef::new(Usuarios::Registration).string().null())
                    .col(ColumnDef::new(Usuarios::RoleId).big_integer().not_null())
                    .col(ColumnDef::new(Usuarios::Status).string().not_null())
                    .col(ColumnDef::new(Usuarios::LastLogin).big_integer().null())
                    .col(ColumnDef::new(Usuarios::CreatedAt).big_integer().not_null())
                    .col(ColumnDef::new(Usuarios::UpdatedAt).big_integer().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .from(Usuarios::Table, Usuarios::RoleId)
                            .to(Roles::Table, Roles::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .to_owned(),
            )
            .await?;

        // Tabela de processos
        manager
            .create_table(
                Table::create()
                    .table(Processos::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Processos::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Processos::ProcessNumber)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Processos::Subject).string().not_null())
                    .col(ColumnDef::new(Processos::Description).text().null())
                    .col(ColumnDef::new(Processos::Status).string().not_null())
                    .col(ColumnDef::new(Processos::Court).string().null())
                    .col(ColumnDef::new(Processos::CourtSystem).string().null())
                    .col(ColumnDef::new(Processos::Phase).string().null())
                    .col(ColumnDef::new(Processos::ClientId).big_integer().null())
                    .col(ColumnDef::new(Processos::CreatedBy).big_integer().not_null())
                    .col(ColumnDef::new(Processos::CreatedAt).big_integer().not_null())
                    .col(ColumnDef::new(Processos::UpdatedAt).big_integer().not_null())
                    .col(ColumnDef::new(Processos::ClosedAt).big_integer().null())
                    .col(ColumnDef::new(Processos::DeletedAt).big_integer().null())
                    .foreign_key(
                        ForeignKey::create()
                            .from(Processos::Table, Processos::ClientId)
                            .to(Usuarios::Table, Usuarios::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(Processos::Table, Processos::CreatedBy)
                            .to(Usuarios::Table, Usuarios::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .to_owned(),
            )
            .await?;

        // Vínculos aluno x processo
        manager
            .create_table(
                Table::create()
                    .table(AlunosProcessos::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(AlunosProcessos::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(AlunosProcessos::ProcessId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(AlunosProcessos::UserId).big_integer().not_null())
                    .col(
                        ColumnDef::new(AlunosProcessos::AssignedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(AlunosProcessos::Table, AlunosProcessos::ProcessId)
                            .to(Processos::Table, Processos::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(AlunosProcessos::Table, AlunosProcessos::UserId)
                            .to(Usuarios::Table, Usuarios::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Vínculos professor x processo
        manager
            .create_table(
                Table::create()
                    .table(ProfessoresProcessos::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(ProfessoresProcessos::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(ProfessoresProcessos::ProcessId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(ProfessoresProcessos::UserId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(ProfessoresProcessos::AssignedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(ProfessoresProcessos::Table, ProfessoresProcessos::ProcessId)
                            .to(Processos::Table, Processos::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(ProfessoresProcessos::Table, ProfessoresProcessos::UserId)
                            .to(Usuarios::Table, Usuarios::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Arquivos anexados
        manager
            .create_table(
                Table::create()
                    .table(Arquivos::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Arquivos::Token)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Arquivos::OriginalName).string().not_null())
                    .col(ColumnDef::new(Arquivos::StoredName).string().not_null())
                    .col(ColumnDef::new(Arquivos::FileSize).big_integer().not_null())
                    .col(ColumnDef::new(Arquivos::ContentType).string().not_null())
                    .col(ColumnDef::new(Arquivos::ProcessId).big_integer().null())
                    .col(ColumnDef::new(Arquivos::UserId).big_integer().not_null())
                    .col(ColumnDef::new(Arquivos::UploadedAt).big_integer().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .from(Arquivos::Table, Arquivos::ProcessId)
                            .to(Processos::Table, Processos::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(Arquivos::Table, Arquivos::UserId)
                            .to(Usuarios::Table, Usuarios::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Atualizações (andamentos) dos processos
        manager
            .create_table(
                Table::create()
                    .table(Atualizacoes::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Atualizacoes::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Atualizacoes::ProcessId).big_integer().not_null())
                    .col(ColumnDef::new(Atualizacoes::AuthorId).big_integer().not_null())
                    .col(ColumnDef::new(Atualizacoes::Kind).string().not_null())
                    .col(ColumnDef::new(Atualizacoes::Title).string().not_null())
                    .col(ColumnDef::new(Atualizacoes::Content).text().null())
                    .col(ColumnDef::new(Atualizacoes::FileToken).string().null())
                    .col(ColumnDef::new(Atualizacoes::CreatedAt).big_integer().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .from(Atualizacoes::Table, Atualizacoes::ProcessId)
                            .to(Processos::Table, Processos::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(Atualizacoes::Table, Atualizacoes::AuthorId)
                            .to(Usuarios::Table, Usuarios::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(Atualizacoes::Table, Atualizacoes::FileToken)
                            .to(Arquivos::Table, Arquivos::Token)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await?;

        // Agendamentos (sincronizados com o Google Calendar)
        manager
            .create_table(
                Table::create()
                    .table(Agendamentos::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Agendamentos::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Agendamentos::ProcessId).big_integer().null())
                    .col(ColumnDef::new(Agendamentos::CreatedBy).big_integer().not_null())
                    .col(
                        ColumnDef::new(Agendamentos::GoogleEventId)
                            .string()
                            .null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Agendamentos::Title).string().not_null())
                    .col(ColumnDef::new(Agendamentos::Description).text().null())
                    .col(ColumnDef::new(Agendamentos::Location).string().null())
                    .col(ColumnDef::new(Agendamentos::Kind).string().not_null())
                    .col(ColumnDef::new(Agendamentos::Status).string().not_null())
                    .col(ColumnDef::new(Agendamentos::StartsAt).big_integer().not_null())
                    .col(ColumnDef::new(Agendamentos::EndsAt).big_integer().not_null())
                    .col(ColumnDef::new(Agendamentos::ReminderMinutes).integer().null())
                    .col(ColumnDef::new(Agendamentos::Attendees).text().not_null())
                    .col(ColumnDef::new(Agendamentos::SyncStatus).string().not_null())
                    .col(ColumnDef::new(Agendamentos::CreatedAt).big_integer().not_null())
                    .col(ColumnDef::new(Agendamentos::UpdatedAt).big_integer().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .from(Agendamentos::Table, Agendamentos::ProcessId)
                            .to(Processos::Table, Processos::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(Agendamentos::Table, Agendamentos::CreatedBy)
                            .to(Usuarios::Table, Usuarios::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Notificações
        manager
            .create_table(
                Table::create()
                    .table(Notificacoes::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Notificacoes::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Notificacoes::UserId).big_integer().not_null())
                    .col(ColumnDef::new(Notificacoes::Kind).string().not_null())
                    .col(ColumnDef::new(Notificacoes::Title).string().not_null())
                    .col(ColumnDef::new(Notificacoes::Content).text().null())
                    .col(ColumnDef::new(Notificacoes::ReferenceType).string().null())
                    .col(ColumnDef::new(Notificacoes::ReferenceId).big_integer().null())
                    .col(
                        ColumnDef::new(Notificacoes::IsRead)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(ColumnDef::new(Notificacoes::CreatedAt).big_integer().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .from(Notificacoes::Table, Notificacoes::UserId)
                            .to(Usuarios::Table, Usuarios::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Índices
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_usuarios_role_id")
                    .table(Usuarios::Table)
                    .col(Usuarios::RoleId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_processos_status")
                    .table(Processos::Table)
                    .col(Processos::Status)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_processos_client_id")
                    .table(Processos::Table)
                    .col(Processos::ClientId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .unique()
                    .name("uq_alunos_processos")
                    .table(AlunosProcessos::Table)
                    .col(AlunosProcessos::ProcessId)
                    .col(AlunosProcessos::UserId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .unique()
                    .name("uq_professores_processos")
                    .table(ProfessoresProcessos::Table)
                    .col(ProfessoresProcessos::ProcessId)
                    .col(ProfessoresProcessos::UserId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_atualizacoes_process_id")
                    .table(Atualizacoes::Table)
                    .col(Atualizacoes::ProcessId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_agendamentos_starts_at")
                    .table(Agendamentos::Table)
                    .col(Agendamentos::StartsAt)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_arquivos_process_id")
                    .table(Arquivos::Table)
                    .col(Arquivos::ProcessId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_notificacoes_user_id")
                    .table(Notificacoes::Table)
                    .col(Notificacoes::UserId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Ordem inversa da criação
        manager
            .drop_table(Table::drop().table(Notificacoes::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Agendamentos::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Atualizacoes::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Arquivos::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(ProfessoresProcessos::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(AlunosProcessos::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Processos::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Usuarios::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Roles::Table).to_owned())
            .await?;
        Ok(())
    }
}

#[derive(DeriveIden)]
pub(crate) enum Roles {
    #[sea_orm(iden = "roles")]
    Table,
    Id,
    Name,
    Description,
}

#[derive(DeriveIden)]
enum Usuarios {
    #[sea_orm(iden = "usuarios")]
    Table,
    Id,
    Name,
    Email,
    PasswordHash,
    Phone,
    Registration,
    RoleId,
    Status,
    LastLogin,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Processos {
    #[sea_orm(iden = "processos")]
    Table,
    Id,
    ProcessNumber,
    Subject,
    Description,
    Status,
    Court,
    CourtSystem,
    Phase,
    ClientId,
    CreatedBy,
    CreatedAt,
    UpdatedAt,
    ClosedAt,
    DeletedAt,
}

#[derive(DeriveIden)]
enum AlunosProcessos {
    #[sea_orm(iden = "alunos_processos")]
    Table,
    Id,
    ProcessId,
    UserId,
    AssignedAt,
}

#[derive(DeriveIden)]
enum ProfessoresProcessos {
    #[sea_orm(iden = "professores_processos")]
    Table,
    Id,
    ProcessId,
    UserId,
    AssignedAt,
}

#[derive(DeriveIden)]
enum Arquivos {
    #[sea_orm(iden = "arquivos")]
    Table,
    Token,
    OriginalName,
    StoredName,
    FileSize,
    ContentType,
    ProcessId,
    UserId,
    UploadedAt,
}

#[derive(DeriveIden)]
enum Atualizacoes {
    #[sea_orm(iden = "atualizacoes")]
    Table,
    Id,
    ProcessId,
    AuthorId,
    Kind,
    Title,
    Content,
    FileToken,
    CreatedAt,
}

#[derive(DeriveIden)]
enum Agendamentos {
    #[sea_orm(iden = "agendamentos")]
    Table,
    Id,
    ProcessId,
    CreatedBy,
    GoogleEventId,
    Title,
    Description,
    Location,
    Kind,
    Status,
    StartsAt,
    EndsAt,
    ReminderMinutes,
    Attendees,
    SyncStatus,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Notificacoes {
    #[sea_orm(iden = "notificacoes")]
    Table,
    Id,
    UserId,
    Kind,
    Title,
    Content,
    ReferenceType,
    ReferenceId,
    IsRead,
    CreatedAt,
}
