//! AI analysis flows. Every endpoint follows the same shape: load the
//! caller's entries, render them into a deterministic text block, send one
//! chat-completion request, sanitize the markdown reply into HTML.

use uuid::Uuid;
use validator::Validate;

use crate::entities::analysis::{
    AnalysisResponse, CompanyAnalyzeRequest, CoverLetterRequest, ResumeRequest,
};
use crate::entities::experience::Experience;
use crate::entities::profile::Profile;
use crate::errors::AppError;
use crate::infrastructure::llm::groq::ChatClient;
use crate::infrastructure::llm::search::WebSearchClient;
use crate::infrastructure::utils::markdown::safe_markdown_to_html;
use crate::repositories::experience::ExperienceRepository;
use crate::repositories::profile::ProfileRepository;

pub struct AnalysisHandler<E, P, L>
where
    E: ExperienceRepository,
    P: ProfileRepository,
    L: ChatClient,
{
    pub experience_repo: E,
    pub profile_repo: P,
    pub chat_client: L,
    pub search_client: Option<WebSearchClient>,
}

impl<E, P, L> AnalysisHandler<E, P, L>
where
    E: ExperienceRepository,
    P: ProfileRepository,
    L: ChatClient,
{
    pub fn new(
        experience_repo: E,
        profile_repo: P,
        chat_client: L,
        search_client: Option<WebSearchClient>,
    ) -> Self {
        AnalysisHandler {
            experience_repo,
            profile_repo,
            chat_client,
            search_client,
        }
    }

    /// Strengths/gaps/action-item summary of the whole portfolio.
    pub async fn analyze_portfolio(&self, user_id: &Uuid) -> Result<AnalysisResponse, AppError> {
        let (portfolio, profile) = self.load_portfolio(user_id).await?;

        let prompt = format!(
            "{header}\n[Activity log]\n{portfolio}\n\n\
             Analyze the activities above in Markdown with these sections:\n\
             1. **Core summary** (3 lines or fewer)\n\
             2. **Three discovered strengths** (bullet points)\n\
             3. **Areas needing improvement** (bullet points)\n\
             4. **Recommended action items** (be specific)\n{extra}",
            header = profile_header(&profile),
            extra = extra_instructions(&profile),
        );

        self.complete("You are an incisive IT career coach.", &prompt).await
    }

    /// Fit assessment against a target company and role, with optional
    /// web-search context about the company.
    pub async fn analyze_company_fit(
        &self,
        user_id: &Uuid,
        request: CompanyAnalyzeRequest,
    ) -> Result<AnalysisResponse, AppError> {
        request.validate()?;
        let (portfolio, profile) = self.load_portfolio(user_id).await?;

        let search_context = match &self.search_client {
            Some(client) => {
                let query = format!("{} {} hiring requirements", request.company, request.role);
                match client.context_for(&query).await {
                    Ok(context) if !context.is_empty() => {
                        format!("[Recent information about the company]\n{context}\n")
                    }
                    Ok(_) => String::new(),
                    Err(e) => {
                        tracing::warn!("web search skipped: {}", e);
                        String::new()
                    }
                }
            }
            None => String::new(),
        };

        let prompt = format!(
            "Target company: {company}\nTarget role: {role}\n{search_context}\
             {header}\n[My activities]\n{portfolio}\n\n\
             Analyze in Markdown from the perspective of a recruiter at {company} hiring for {role}:\n\
             1. **Role fit score** (out of 100)\n\
             2. **Key strengths that improve the odds of an offer**\n\
             3. **Three likely interview questions**\n{extra}",
            company = request.company,
            role = request.role,
            header = profile_header(&profile),
            extra = extra_instructions(&profile),
        );

        self.complete("You are a recruiter at a major company.", &prompt).await
    }

    /// Resume headline blurb; company/role are optional hints.
    pub async fn generate_resume(
        &self,
        user_id: &Uuid,
        request: ResumeRequest,
    ) -> Result<AnalysisResponse, AppError> {
        request.validate()?;
        let (portfolio, profile) = self.load_portfolio(user_id).await?;

        let company = request.company.as_deref().unwrap_or("unspecified");
        let role = request.role.as_deref().unwrap_or("unspecified");

        let prompt = format!(
            "{header}Target company: {company}\nTarget role: {role}\n\
             [Activity log]\n{portfolio}\n\n\
             Write the 'core competency summary' for the top of a resume, in Markdown:\n\
             1. **Three core competencies to emphasize**\n\
             2. **Key achievement summary** (lead with numbers)\n\
             3. **One tailored pitch line for {company}**\n{extra}",
            header = profile_header(&profile),
            extra = extra_instructions(&profile),
        );

        self.complete("You are a resume consultant.", &prompt).await
    }

    pub async fn generate_cover_letter(
        &self,
        user_id: &Uuid,
        request: CoverLetterRequest,
    ) -> Result<AnalysisResponse, AppError> {
        request.validate()?;
        let (portfolio, profile) = self.load_portfolio(user_id).await?;

        let extra_request = request
            .extra_request
            .as_deref()
            .map(str::trim)
            .unwrap_or("");

        let prompt = format!(
            "Company applied to: {company}\nRole applied to: {role}\n\
             Additional request: {extra_request}\n{header}\
             [Activity log]\n{portfolio}\n\n\
             Draft a cover letter (motivation + role competency) in Markdown.\n\
             - Split into paragraphs\n\
             - Ground every claim in a concrete experience\n{extra}",
            company = request.company,
            role = request.role,
            header = profile_header(&profile),
            extra = extra_instructions(&profile),
        );

        self.complete("You are a professional cover letter writer.", &prompt).await
    }

    async fn load_portfolio(&self, user_id: &Uuid) -> Result<(String, Profile), AppError> {
        let entries = self.experience_repo.list_for_user(user_id, false).await?;
        if entries.is_empty() {
            return Err(AppError::InvalidInput(
                "Add some experiences before requesting an analysis".to_string(),
            ));
        }

        let profile = self
            .profile_repo
            .get_profile(user_id)
            .await?
            .unwrap_or_else(|| Profile::empty(*user_id));

        let today = chrono::Utc::now().format("%Y-%m-%d").to_string();
        Ok((build_portfolio_text(&entries, &today), profile))
    }

    async fn complete(&self, system: &str, prompt: &str) -> Result<AnalysisResponse, AppError> {
        let markdown = self.chat_client.complete(system, prompt).await?;
        Ok(AnalysisResponse {
            html: safe_markdown_to_html(&markdown),
            model: self.chat_client.model().to_string(),
        })
    }
}

/// Renders experience rows into the text block embedded in every prompt.
/// Output is deterministic for a fixed `today`.
pub fn build_portfolio_text(entries: &[Experience], today: &str) -> String {
    entries
        .iter()
        .map(|e| {
            format!(
                "- [{status}] {category} | {title}\n  \
                 Period: {start} ~ {end}\n  \
                 Skills: {skills}\n  \
                 Details: {description}\n  \
                 Hours: {hours}h\n",
                status = e.status_on(today).label(),
                category = e.category,
                title = e.title,
                start = e.start_date.as_deref().unwrap_or(""),
                end = e.end_date.as_deref().unwrap_or("present"),
                skills = e.skills.as_deref().unwrap_or(""),
                description = e.description.as_deref().unwrap_or(""),
                hours = e.hours,
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn profile_header(profile: &Profile) -> String {
    let mut fields = Vec::new();
    if !profile.name.is_empty() {
        fields.push(format!("Name: {}", profile.name));
    }
    if !profile.major.is_empty() {
        fields.push(format!("Major: {}", profile.major));
    }
    if !profile.goal.is_empty() {
        fields.push(format!("Goal: {}", profile.goal));
    }
    if !profile.strengths.is_empty() {
        fields.push(format!("Self-assessed strengths: {}", profile.strengths));
    }

    if fields.is_empty() {
        String::new()
    } else {
        format!("[Applicant profile] {}\n", fields.join(" / "))
    }
}

fn extra_instructions(profile: &Profile) -> String {
    let instructions = profile.ai_instructions.trim();
    if instructions.is_empty() {
        String::new()
    } else {
        format!("\nAdditional instructions from the applicant: {instructions}\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use uuid::Uuid;

    fn entry(title: &str, end_date: Option<&str>) -> Experience {
        Experience {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            category: "Project".into(),
            title: title.into(),
            description: Some("Built a thing".into()),
            start_date: Some("2024-01-01".into()),
            end_date: end_date.map(String::from),
            skills: Some("Rust, SQL".into()),
            hours: 120,
            link: None,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn portfolio_text_includes_status_and_fields() {
        let entries = vec![entry("Search engine", Some("2024-06-30")), entry("Chatbot", None)];
        let text = build_portfolio_text(&entries, "2025-01-01");

        assert!(text.contains("- [completed] Project | Search engine"));
        assert!(text.contains("- [ongoing] Project | Chatbot"));
        assert!(text.contains("Period: 2024-01-01 ~ present"));
        assert!(text.contains("Skills: Rust, SQL"));
        assert!(text.contains("Hours: 120h"));
    }

    #[test]
    fn portfolio_text_is_deterministic() {
        let entries = vec![entry("A", None)];
        assert_eq!(
            build_portfolio_text(&entries, "2025-01-01"),
            build_portfolio_text(&entries, "2025-01-01")
        );
    }

    #[test]
    fn profile_header_skips_empty_fields() {
        let mut profile = Profile::empty(Uuid::new_v4());
        assert_eq!(profile_header(&profile), "");

        profile.major = "Computer Science".into();
        profile.goal = "Backend engineer".into();
        let header = profile_header(&profile);
        assert!(header.contains("Major: Computer Science"));
        assert!(header.contains("Goal: Backend engineer"));
        assert!(!header.contains("Name:"));
    }

    #[test]
    fn extra_instructions_only_when_present() {
        let mut profile = Profile::empty(Uuid::new_v4());
        assert_eq!(extra_instructions(&profile), "");

        profile.ai_instructions = "Answer in formal tone".into();
        assert!(extra_instructions(&profile).contains("Answer in formal tone"));
    }
}
