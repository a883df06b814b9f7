//! # 사용자 리포지토리 구현
//!
//! 사용자 엔티티의 데이터 액세스 계층을 담당하는 리포지토리입니다.
//! MongoDB를 주 저장소로 사용합니다.
//!
//! ## 특징
//!
//! - **원자적 find-or-create**: `findOneAndUpdate` upsert로 프로바이더 최초
//!   로그인의 경쟁 조건 제거
//! - **데이터 무결성**: 프로바이더 외부 ID별 partial unique index 관리
//! - **명시적 의존성**: 조립 루트에서 주입된 `Arc<Database>` 사용

use std::sync::Arc;
use futures_util::stream::TryStreamExt;
use mongodb::{
    bson::{doc, oid::ObjectId, DateTime},
    options::{FindOneAndUpdateOptions, IndexOptions, ReturnDocument},
    Collection, IndexModel,
};
use crate::{
    config::AuthProvider,
    db::Database,
    domain::entities::users::user::User,
};
use crate::errors::errors::AppError;

/// 사용자 데이터 액세스 리포지토리
///
/// 이 리포지토리는 사용자 엔티티의 조회/생성 연산과
/// 프로바이더 계정 연결(find-or-create)을 담당합니다.
///
/// ## 저장 구조
///
/// - **컬렉션명**: `users`
/// - **인덱스**: username(unique, partial), google_id/facebook_id/twitter_id
///   (unique, partial), created_at(desc)
///
/// ## find-or-create 동작
///
/// ```text
/// 프로바이더 콜백에서 외부 ID 획득
///           │
///           ▼
///   findOneAndUpdate(
///       filter:      { google_id: "1234" },
///       update:      { $setOnInsert: { google_id: "1234", ... } },
///       upsert:      true,
///       returnAfter: true,
///   )
///           │
///           ├─ 기존 문서 있음 ──► 그대로 반환 (변경 없음)
///           │
///           └─ 문서 없음 ──────► 새 문서 삽입 후 반환
/// ```
///
/// 같은 외부 ID로 동시에 두 번의 최초 로그인이 들어와도
/// 저장소가 한 문서로 수렴시키며, partial unique index가
/// 중복 삽입을 최종적으로 차단합니다.
///
/// ## 에러 처리
///
/// 모든 메서드는 `Result<T, AppError>` 타입을 반환하며,
/// 다음과 같은 에러 상황을 처리합니다:
///
/// - **DatabaseError**: MongoDB 연결 오류, 쿼리 실행 오류
/// - **ValidationError**: 잘못된 ObjectId 형식 등 입력값 검증 오류
/// - **ConflictError**: 사용자명 중복 등 비즈니스 규칙 위반
///
/// ## 사용 예제
///
/// ```rust,ignore
/// use crate::repositories::users::user_repo::UserRepository;
///
/// let repo = UserRepository::new(database);
///
/// // 로컬 사용자 생성
/// let created = repo.create(User::new_local(username, hash)).await?;
///
/// // 프로바이더 계정 연결
/// let linked = repo.find_or_create_linked(AuthProvider::Google, "1234").await?;
/// assert_eq!(linked.google_id.as_deref(), Some("1234"));
/// ```
pub struct UserRepository {
    /// MongoDB 데이터베이스 연결
    db: Arc<Database>,
}

impl UserRepository {
    /// 컬렉션명
    const COLLECTION: &'static str = "users";

    /// 새 리포지토리 인스턴스를 생성합니다.
    pub fn new(db: Arc<Database>) -> Self {
        Self { db }
    }

    /// `users` 컬렉션 핸들을 반환합니다.
    fn collection(&self) -> Collection<User> {
        self.db.get_database().collection::<User>(Self::COLLECTION)
    }

    /// 사용자명으로 사용자 조회
    ///
    /// 사용자명은 로컬 로그인 식별자이며 존재하는 문서들 사이에서
    /// 유니크하므로 최대 1개의 결과만 반환됩니다.
    ///
    /// # 인자
    ///
    /// * `username` - 조회할 사용자명
    ///
    /// # 반환값
    ///
    /// * `Ok(Some(User))` - 사용자를 찾은 경우
    /// * `Ok(None)` - 해당 사용자명의 사용자가 없는 경우
    /// * `Err(AppError::DatabaseError)` - 데이터베이스 오류
    pub async fn find_by_username(&self, username: &str) -> Result<Option<User>, AppError> {
        self.collection()
            .find_one(doc! { "username": username })
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))
    }

    /// ID로 사용자 조회
    ///
    /// 세션 주체 복원(deserialize) 경로에서 요청마다 호출됩니다.
    ///
    /// # 인자
    ///
    /// * `id` - MongoDB ObjectId의 16진수 문자열 표현
    ///
    /// # 반환값
    ///
    /// * `Ok(Some(User))` - 사용자를 찾은 경우
    /// * `Ok(None)` - 해당 ID의 사용자가 없는 경우
    /// * `Err(AppError::ValidationError)` - 잘못된 ObjectId 형식
    /// * `Err(AppError::DatabaseError)` - 데이터베이스 오류
    pub async fn find_by_id(&self, id: &str) -> Result<Option<User>, AppError> {
        let object_id = ObjectId::parse_str(id)
            .map_err(|_| AppError::ValidationError("유효하지 않은 ID 형식입니다".to_string()))?;

        self.collection()
            .find_one(doc! { "_id": object_id })
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))
    }

    /// 새 로컬 사용자 생성
    ///
    /// 사용자명 중복 여부를 사전에 검증하고 문서를 삽입합니다.
    ///
    /// # 인자
    ///
    /// * `user` - 생성할 사용자 정보 (ID는 자동 할당됨)
    ///
    /// # 반환값
    ///
    /// * `Ok(User)` - 생성된 사용자 (ID 포함)
    /// * `Err(AppError::ConflictError)` - 사용자명 중복
    /// * `Err(AppError::DatabaseError)` - 데이터베이스 오류
    ///
    /// # 비즈니스 규칙
    ///
    /// 1. **사용자명 유니크성**: 동일한 사용자명으로 두 번째 계정 생성 불가
    ///    (사전 조회 + unique partial index의 이중 방어)
    /// 2. **ID 자동 할당**: MongoDB가 자동으로 ObjectId 생성
    pub async fn create(&self, mut user: User) -> Result<User, AppError> {
        // 중복 확인
        if let Some(username) = user.username.as_deref() {
            if self.find_by_username(username).await?.is_some() {
                return Err(AppError::ConflictError("이미 사용 중인 사용자명입니다".to_string()));
            }
        }

        // DB에 저장
        let result = self.collection()
            .insert_one(&user)
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        user.id = result.inserted_id.as_object_id();

        Ok(user)
    }

    /// 프로바이더 외부 ID 기준 find-or-create
    ///
    /// 해당 프로바이더 필드가 `external_id`인 문서를 찾고,
    /// 없으면 그 필드만 채워진 새 문서를 만들어 반환합니다.
    /// 전체 연산은 `findOneAndUpdate` + upsert로 원자적으로 수행됩니다.
    ///
    /// # 인자
    ///
    /// * `provider` - 연결할 인증 프로바이더 (Local은 허용되지 않음)
    /// * `external_id` - 프로바이더가 발급한 사용자 외부 ID
    ///
    /// # 반환값
    ///
    /// * `Ok(User)` - 기존 또는 새로 생성된 사용자
    /// * `Err(AppError::ValidationError)` - Local 프로바이더로 호출한 경우
    /// * `Err(AppError::DatabaseError)` - 데이터베이스 오류
    ///
    /// # 멱등성
    ///
    /// 같은 (프로바이더, 외부 ID)로 다시 호출하면 항상 같은 문서가
    /// 반환됩니다. 새 문서가 만들어지는 경우는 필터에 일치하는 문서가
    /// 없을 때뿐입니다.
    pub async fn find_or_create_linked(
        &self,
        provider: AuthProvider,
        external_id: &str,
    ) -> Result<User, AppError> {
        let field = provider.link_field().ok_or_else(|| {
            AppError::ValidationError("로컬 인증은 외부 ID 연결을 사용하지 않습니다".to_string())
        })?;

        let now = DateTime::now();
        let filter = doc! { field: external_id };
        let update = doc! {
            "$setOnInsert": {
                field: external_id,
                "secrets": [],
                "created_at": now,
                "updated_at": now,
            }
        };

        let options = FindOneAndUpdateOptions::builder()
            .upsert(true)
            .return_document(ReturnDocument::After)
            .build();

        let user = self.collection()
            .find_one_and_update(filter, update)
            .with_options(options)
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?
            .ok_or_else(|| {
                // upsert + ReturnDocument::After 조합에서는 도달할 수 없음
                AppError::DatabaseError("upsert가 문서를 반환하지 않았습니다".to_string())
            })?;

        log::info!("{} 계정 연결 확인: 사용자 ID {}", provider.as_str(),
            user.id_string().unwrap_or_default());

        Ok(user)
    }

    /// 사용자 문서에 시크릿 추가
    ///
    /// # 인자
    ///
    /// * `user_id` - 대상 사용자의 ObjectId
    /// * `secret` - 추가할 시크릿 텍스트 (사전에 trim 된 상태)
    ///
    /// # 반환값
    ///
    /// * `Ok(())` - 추가 성공
    /// * `Err(AppError::NotFound)` - 해당 사용자가 존재하지 않는 경우
    /// * `Err(AppError::DatabaseError)` - 데이터베이스 오류
    pub async fn push_secret(&self, user_id: &ObjectId, secret: &str) -> Result<(), AppError> {
        let result = self.collection()
            .update_one(
                doc! { "_id": user_id },
                doc! {
                    "$push": { "secrets": secret },
                    "$set": { "updated_at": DateTime::now() },
                },
            )
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        if result.matched_count == 0 {
            return Err(AppError::NotFound("사용자를 찾을 수 없습니다".to_string()));
        }

        Ok(())
    }

    /// 모든 사용자가 제출한 시크릿 목록 조회
    ///
    /// 시크릿 페이지 렌더링에 사용됩니다. 제출자가 누구인지는
    /// 노출하지 않으므로 텍스트만 평탄화하여 반환합니다.
    ///
    /// # 반환값
    ///
    /// * `Ok(Vec<String>)` - 제출된 모든 시크릿 (제출 문서 순)
    /// * `Err(AppError::DatabaseError)` - 데이터베이스 오류
    pub async fn list_all_secrets(&self) -> Result<Vec<String>, AppError> {
        let mut cursor = self.collection()
            .find(doc! { "secrets.0": { "$exists": true } })
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        let mut secrets = Vec::new();
        while let Some(user) = cursor
            .try_next()
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?
        {
            secrets.extend(user.secrets);
        }

        Ok(secrets)
    }

    /// 데이터베이스 인덱스 생성
    ///
    /// 사용자 컬렉션에 필요한 모든 인덱스를 생성합니다.
    /// 애플리케이션 초기화 시점에 한 번 실행됩니다.
    ///
    /// # 생성되는 인덱스
    ///
    /// 1. **사용자명 유니크 인덱스** (partial)
    ///    - 필드: `username` (오름차순), 필드가 존재하는 문서에만 적용
    ///    - 목적: 로컬 로그인 식별자 중복 방지
    ///
    /// 2. **프로바이더 ID 유니크 인덱스** (partial) × 3
    ///    - 필드: `google_id` / `facebook_id` / `twitter_id`
    ///    - 목적: (프로바이더, 외부 ID) 쌍당 문서 1개 불변식 보장.
    ///      find-or-create upsert가 경쟁하더라도 중복 문서가 남지 않음
    ///
    /// 3. **생성일 인덱스**
    ///    - 필드: `created_at` (내림차순)
    ///
    /// # 반환값
    ///
    /// * `Ok(())` - 모든 인덱스가 성공적으로 생성됨
    /// * `Err(AppError::DatabaseError)` - 인덱스 생성 중 오류 발생
    ///
    /// # 주의사항
    ///
    /// partial index를 사용하는 이유: 이 컬렉션의 식별자 필드들은 모두
    /// 선택적이므로, 일반 unique index는 필드가 없는 문서들(null)끼리
    /// 충돌합니다.
    pub async fn create_indexes(&self) -> Result<(), AppError> {
        let collection = self.collection();

        let mut indexes = vec![Self::partial_unique_index("username")];
        for field in ["google_id", "facebook_id", "twitter_id"] {
            indexes.push(Self::partial_unique_index(field));
        }

        // 생성일 인덱스
        indexes.push(
            IndexModel::builder()
                .keys(doc! { "created_at": -1 })
                .options(IndexOptions::builder()
                    .name("created_at_desc".to_string())
                    .build())
                .build(),
        );

        collection
            .create_indexes(indexes)
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        Ok(())
    }

    /// 필드가 존재하는 문서에만 적용되는 unique index 모델을 구성합니다
    fn partial_unique_index(field: &str) -> IndexModel {
        IndexModel::builder()
            .keys(doc! { field: 1 })
            .options(IndexOptions::builder()
                .unique(true)
                .name(format!("{}_unique", field))
                .partial_filter_expression(doc! { field: { "$exists": true } })
                .build())
            .build()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_unique_index_shape() {
        let index = UserRepository::partial_unique_index("google_id");

        assert_eq!(index.keys, doc! { "google_id": 1 });

        let options = index.options.expect("options must be set");
        assert_eq!(options.unique, Some(true));
        assert_eq!(options.name.as_deref(), Some("google_id_unique"));
        assert_eq!(
            options.partial_filter_expression,
            Some(doc! { "google_id": { "$exists": true } })
        );
    }

    #[test]
    fn test_link_field_is_required_for_find_or_create() {
        // Local 프로바이더에는 연결 필드가 없다
        assert!(AuthProvider::Local.link_field().is_none());
        assert!(AuthProvider::Twitter.link_field().is_some());
    }
}
