use async_trait::async_trait;
use galaxy_rbac_application::{CreateUserInput, PrincipalPort};
use galaxy_rbac_core::AppResult;
use galaxy_rbac_domain::{Me, Organization, Team, User};
use reqwest::Method;
use serde_json::json;

use super::HttpGalaxyClient;

#[async_trait]
impl PrincipalPort for HttpGalaxyClient {
    async fn create_user(&self, input: CreateUserInput) -> AppResult<User> {
        self.send_json(
            Method::POST,
            "_ui/v2/users/",
            &json!({
                "username": input.username,
                "email": input.email,
                "password": input.password,
            }),
            "create user",
        )
        .await
    }

    async fn me(&self) -> AppResult<Me> {
        self.get_json("_ui/v1/me/", "read current user").await
    }

    async fn create_organization(&self, name: &str) -> AppResult<Organization> {
        self.send_json(
            Method::POST,
            "_ui/v2/organizations/",
            &json!({ "name": name }),
            "create organization",
        )
        .await
    }

    async fn create_team(&self, name: &str, organization_name: &str) -> AppResult<Team> {
        self.send_json(
            Method::POST,
            "_ui/v2/teams/",
            &json!({ "name": name, "organization": organization_name }),
            "create team",
        )
        .await
    }

    async fn associate_team_users(&self, team_id: i64, user_ids: &[i64]) -> AppResult<()> {
        self.send_json_discarding(
            Method::POST,
            format!("_ui/v2/teams/{team_id}/users/associate/").as_str(),
            &json!({ "instances": user_ids }),
            "associate team users",
        )
        .await
    }
}
