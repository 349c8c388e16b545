use sea_orm::{ColumnTrait, ConnectionTrait, DbErr, EntityTrait, QueryFilter, QueryOrder};

pub struct UniversityRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> UniversityRepository<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    /// Get every university ordered by name
    pub async fn get_all(&self) -> Result<Vec<entity::university::Model>, DbErr> {
        entity::prelude::University::find()
            .order_by_asc(entity::university::Column::Name)
            .all(self.db)
            .await
    }

    pub async fn get(
        &self,
        university_id: i32,
    ) -> Result<Option<entity::university::Model>, DbErr> {
        entity::prelude::University::find_by_id(university_id)
            .one(self.db)
            .await
    }

    pub async fn get_many(
        &self,
        university_ids: &[i32],
    ) -> Result<Vec<entity::university::Model>, DbErr> {
        entity::prelude::University::find()
            .filter(entity::university::Column::Id.is_in(university_ids.iter().copied()))
            .all(self.db)
            .await
    }
}

#[cfg(test)]
mod tests {
    use bookmeet_test_utils::prelude::*;

    use crate::server::data::user::university::UniversityRepository;

    /// Expect universities to be returned ordered by name
    #[tokio::test]
    async fn gets_all_ordered_by_name() -> Result<(), TestError> {
        let mut test = test_setup_with_marketplace_tables!()?;
        test.user().insert_university("Stanford University").await?;
        test.user().insert_university("Boston University").await?;

        let repo = UniversityRepository::new(&test.state.db);
        let names: Vec<String> = repo.get_all().await?.into_iter().map(|u| u.name).collect();

        assert_eq!(names, vec!["Boston University", "Stanford University"]);

        Ok(())
    }

    /// Expect only requested universities to be returned
    #[tokio::test]
    async fn gets_many_by_id() -> Result<(), TestError> {
        let mut test = test_setup_with_marketplace_tables!()?;
        let boston = test.user().insert_university("Boston University").await?;
        test.user().insert_university("Stanford University").await?;

        let repo = UniversityRepository::new(&test.state.db);
        let result = repo.get_many(&[boston.id]).await?;

        assert_eq!(result.len(), 1);
        assert_eq!(result[0].id, boston.id);

        Ok(())
    }
}
