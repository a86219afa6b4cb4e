use serde::Serialize;
use utoipa::OpenApi;
use utoipa::ToSchema;

#[derive(ToSchema)]
pub struct HealthResponse { pub status: String, pub service: String }

#[derive(ToSchema)]
pub struct ScheduleInputDoc {
    pub pet_id: i32,
    /// `clinico` or `petshop`
    pub service_line: String,
    /// RFC 3339 instant (alias `data_hora`)
    pub scheduled_at: String,
    /// At most 500 characters (alias `observacoes`)
    pub notes: Option<String>,
    /// Alias `veterinario_id`
    pub veterinarian_id: Option<i32>,
}

#[derive(ToSchema)]
pub struct StatusInputDoc {
    pub id: i32,
    /// `agendado`, `confirmado`, `concluido` or `cancelado`
    pub status: String,
}

#[derive(ToSchema)]
pub struct IdInputDoc { pub id: i32 }

#[derive(ToSchema, Serialize)]
pub struct AppendInputDoc {
    /// `YYYY-MM-DD` (alias `data`)
    pub date: String,
    /// Alias `tipo`
    #[serde(rename = "type")]
    pub kind: String,
    /// Alias `descricao`
    pub description: String,
    /// Alias `responsavel`
    pub responsible: String,
    /// Upload references (alias `arquivos`)
    pub files: Vec<String>,
}

#[derive(ToSchema)]
pub struct UpdateRecordInputDoc {
    /// The only writable field (alias `responsavel`)
    pub responsible: String,
}

#[derive(ToSchema)]
pub struct PetInputDoc {
    pub name: String,
    pub species: String,
    pub breed: Option<String>,
}

#[derive(ToSchema)]
pub struct CreatePetInputDoc {
    pub client_id: i32,
    pub name: String,
    pub species: String,
    pub breed: Option<String>,
}

#[derive(ToSchema)]
pub struct CreateClientInputDoc {
    /// At least 3 characters
    pub name: String,
    pub email: String,
    /// 10 or 11 digits once punctuation is removed
    pub phone: String,
    pub pets: Vec<PetInputDoc>,
}

#[derive(ToSchema)]
pub struct UpdateClientInputDoc {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
}

#[derive(ToSchema)]
pub struct VeterinarianInputDoc { pub name: String }

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::routes::health,
        crate::routes::appointments::schedule,
        crate::routes::appointments::list,
        crate::routes::appointments::get,
        crate::routes::appointments::update_status,
        crate::routes::appointments::cancel,
        crate::routes::medical_records::list_for_pet,
        crate::routes::medical_records::append,
        crate::routes::medical_records::upload_documents,
        crate::routes::medical_records::get,
        crate::routes::medical_records::update,
        crate::routes::medical_records::delete,
        crate::routes::clients::create,
        crate::routes::clients::list,
        crate::routes::clients::get,
        crate::routes::clients::update,
        crate::routes::clients::delete,
        crate::routes::pets::create,
        crate::routes::pets::list,
        crate::routes::pets::get,
        crate::routes::pets::update,
        crate::routes::pets::delete,
        crate::routes::pets::upload_photo,
        crate::routes::pets::photos,
        crate::routes::veterinarians::create,
        crate::routes::veterinarians::list,
        crate::routes::veterinarians::get,
        crate::routes::veterinarians::update,
        crate::routes::veterinarians::delete,
    ),
    components(schemas(
        HealthResponse,
        ScheduleInputDoc,
        StatusInputDoc,
        IdInputDoc,
        AppendInputDoc,
        UpdateRecordInputDoc,
        PetInputDoc,
        CreatePetInputDoc,
        CreateClientInputDoc,
        UpdateClientInputDoc,
        VeterinarianInputDoc,
    )),
    tags(
        (name = "health", description = "Liveness"),
        (name = "agendamentos", description = "Appointments"),
        (name = "prontuarios", description = "Medical records"),
        (name = "clientes", description = "Clients"),
        (name = "pets", description = "Pets and photos"),
        (name = "veterinarios", description = "Veterinarians"),
    )
)]
pub struct ApiDoc;
