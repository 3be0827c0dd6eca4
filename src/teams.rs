//! Teams: named groups of users with assigned role templates

use crate::console::{matches_term, new_id, today, Console};
use crate::error::{Error, Result};
use crate::models::{NewTeam, Team};

impl Console<'_> {
    pub fn teams(&self) -> &[Team] {
        &self.teams
    }

    pub fn team(&self, id: &str) -> Result<&Team> {
        self.teams
            .iter()
            .find(|t| t.id == id)
            .ok_or_else(|| Error::not_found("team", id))
    }

    pub fn create_team(&mut self, new: NewTeam) -> Result<&Team> {
        if new.name.trim().is_empty() {
            return Err(Error::EmptyName);
        }
        let now = today();
        let team = Team {
            id: new_id(),
            name: new.name,
            description: new.description,
            members: new.members,
            roles: new.roles,
            created_at: now,
            updated_at: now,
        };
        for user in self.users.iter_mut().filter(|u| team.members.contains(&u.id)) {
            user.team_ids.push(team.id.clone());
        }
        tracing::info!(id = %team.id, members = team.members.len(), "team created");
        self.teams.push(team);
        Ok(&self.teams[self.teams.len() - 1])
    }

    pub fn delete_team(&mut self, id: &str) -> Result<Team> {
        let idx = self
            .teams
            .iter()
            .position(|t| t.id == id)
            .ok_or_else(|| Error::not_found("team", id))?;
        let team = self.teams.remove(idx);
        for user in &mut self.users {
            user.team_ids.retain(|t| t != id);
        }
        tracing::info!(id, "team deleted");
        Ok(team)
    }

    /// Case-insensitive match on name or description
    pub fn search_teams(&self, term: &str) -> Vec<&Team> {
        self.teams
            .iter()
            .filter(|t| matches_term(&t.name, term) || matches_term(&t.description, term))
            .collect()
    }

    pub fn team_member_names(&self, id: &str) -> Result<Vec<&str>> {
        Ok(self
            .team(id)?
            .members
            .iter()
            .map(|m| self.user_name(m))
            .collect())
    }
}
