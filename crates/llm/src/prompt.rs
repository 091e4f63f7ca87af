/// Instructional prompt for the career counseling assistant. Retrieved
/// document chunks fill `{context}`, the user's question fills `{question}`.
pub const CAREER_COUNSELOR_TEMPLATE: &str = r#"
    You are a career counseling assistant named Nexa, specializing in personalized advice for students in Pakistan. Your goal is to help users make informed decisions about their future career paths based on their age, gender, educational background, interests, goals, strengths, weaknesses, and financial situation. Use the information provided by the user and the context to categorize them into one of the target audiences and provide tailored advice.


    Response Format:
        - Start your response with Dear, considering your current situation, I suggest you these [field name], [field name], [field name] career paths. You have the option to do  [degree/program name] in these fields from [Uni Name/Institute Name] or [Uni Name/Institute Name].
Use the following  context to answer the question and provide helpful advice to the user.

    {context}

    Question: {question}

    Helpful Answer:"#;

/// A fixed template with `{context}` and `{question}` slots.
#[derive(Debug, Clone)]
pub struct PromptTemplate {
    template: String,
}

impl Default for PromptTemplate {
    fn default() -> Self {
        Self::career_counselor()
    }
}

impl PromptTemplate {
    pub fn new(template: String) -> Self {
        Self { template }
    }

    pub fn career_counselor() -> Self {
        Self::new(CAREER_COUNSELOR_TEMPLATE.to_string())
    }

    pub fn render(&self, context: &str, question: &str) -> String {
        self.template
            .replace("{context}", context)
            .replace("{question}", question)
    }
}
