pub use super::agendamentos::{
    ActiveModel as AppointmentActiveModel, Entity as Agendamentos, Model as AppointmentModel,
};
pub use super::alunos_processos::{
    ActiveModel as StudentAssignmentActiveModel, Entity as AlunosProcessos,
};
pub use super::arquivos::{ActiveModel as FileActiveModel, Entity as Arquivos, Model as FileModel};
pub use super::atualizacoes::{
    ActiveModel as ProcessUpdateActiveModel, Entity as Atualizacoes, Model as ProcessUpdateModel,
};
pub use super::notificacoes::{
    ActiveModel as NotificationActiveModel, Entity as Notificacoes, Model as NotificationModel,
};
pub use super::processos::{
    ActiveModel as ProcessActiveModel, Entity as Processos, Model as ProcessModel,
};
pub use super::professores_processos::{
    ActiveModel as ProfessorAssignmentActiveModel, Entity as ProfessoresProcessos,
};
pub use super::roles::{Entity as Roles, Model as RoleModel};
pub use super::usuarios::{ActiveModel as UserActiveModel, Entity as Usuarios, Model as UserModel};
