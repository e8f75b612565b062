use sqlx::PgPool;

#[derive(Clone)]
pub struct SqlxUserRepo {
    pub pool: PgPool,
}

#[derive(Clone)]
pub struct SqlxProfileRepo {
    pub pool: PgPool,
}

#[derive(Clone)]
pub struct SqlxExperienceRepo {
    pub pool: PgPool,
}
