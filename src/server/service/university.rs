use sea_orm::DatabaseConnection;

use crate::{
    model::user::UniversityDto,
    server::{data::user::university::UniversityRepository, error::Error},
};

pub struct UniversityService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> UniversityService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// List every university ordered by name
    pub async fn get_universities(&self) -> Result<Vec<UniversityDto>, Error> {
        let universities = UniversityRepository::new(self.db).get_all().await?;

        Ok(universities
            .into_iter()
            .map(|university| UniversityDto {
                id: university.id,
                name: university.name,
                country: university.country,
                alpha_two_code: university.alpha_two_code,
            })
            .collect())
    }
}
