// Prompt constants for the six ticket agents.
// Templates use `{subject}`, `{description}` and `{historical_context}` placeholders.
// System instructions get the JSON-only suffix from llm_client::prompts.

pub const SUMMARY_ROLE: &str =
    "You are a customer support AI that accurately summarizes tickets.";

pub const SUMMARY_PROMPT_TEMPLATE: &str = r#"
Analyze this support ticket and provide:
1. A concise summary (3-4 sentences)
2. 3-5 key points
3. Customer sentiment (positive, neutral, or negative)

Ticket: {subject}
Description: {description}

Format your response as valid JSON with the following structure:
{
  "summary": "The concise summary here",
  "keyPoints": ["Point 1", "Point 2", "Point 3"],
  "sentiment": "neutral"
}
"#;

pub const ACTIONS_ROLE: &str =
    "You are a customer support expert who identifies required actions.";

pub const ACTIONS_PROMPT_TEMPLATE: &str = r#"
Analyze this support ticket and extract required actions:
Ticket: {subject}
Description: {description}

Identify 2-4 specific actions that should be taken to resolve this ticket.
Each action should have:
1. A type (investigation, customer contact, technical fix, escalation, etc.)
2. A priority (low, medium, high)
3. A clear description of what needs to be done

Format your response as valid JSON with the following structure:
{
  "actions": [
    {
      "type": "investigation",
      "priority": "high",
      "description": "Details of what needs to be investigated"
    },
    {
      "type": "technical fix",
      "priority": "medium",
      "description": "Details of what needs to be fixed"
    }
  ]
}
"#;

pub const ROUTING_ROLE: &str = "You are a ticket routing specialist.";

pub const ROUTING_PROMPT_TEMPLATE: &str = r#"
Analyze this support ticket and determine which team it should be routed to:
Ticket: {subject}
Description: {description}

Choose the most appropriate team and explain your reasoning.
Potential teams: technical-support, billing, account-management, product-feedback, security, legal

Format your response as valid JSON with the following structure:
{
  "recommendedTeam": "technical-support",
  "confidence": 0.85,
  "reasoning": "Explanation of why this team is appropriate",
  "alternativeTeams": [
    {"team": "account-management", "confidence": 0.25}
  ]
}
"#;

pub const SENTIMENT_ROLE: &str =
    "You are a sentiment analysis specialist who can detect emotions and tone in text.";

pub const SENTIMENT_PROMPT_TEMPLATE: &str = r#"
Perform a detailed sentiment analysis of this customer support ticket:
Ticket: {subject}
Description: {description}

Analyze the customer's emotions, tone, and attitude in the message.
Be specific about the different emotions detected and their intensity.

Format your response as valid JSON with the following structure:
{
  "overallSentiment": "positive/negative/neutral",
  "sentimentScore": 0.75,
  "primaryEmotions": ["frustration", "confusion"],
  "emotionalTriggers": ["product failure", "unclear instructions"],
  "customerTone": "professional but urgent",
  "urgencyLevel": "high/medium/low",
  "satisfactionIndicators": {"positive": ["appreciate your help"], "negative": ["third time contacting support"]}
}
"#;

pub const RECOMMENDATIONS_ROLE: &str =
    "You are a support resolution specialist with access to historical cases.";

pub const RECOMMENDATIONS_PROMPT_TEMPLATE: &str = r#"
Based on this support ticket and historical data, recommend potential resolutions:
Ticket: {subject}
Description: {description}

Historical Context:
{historical_context}

Provide 1-3 suggested resolutions with clear steps.

Format your response as valid JSON with the following structure:
{
  "suggestedResolutions": [
    {
      "title": "Title of the resolution approach",
      "steps": ["Step 1", "Step 2", "Step 3"],
      "confidence": 0.85,
      "source": "Based on historical case #TECH_021"
    }
  ]
}
"#;

pub const TIME_ESTIMATION_ROLE: &str = "You are a support resolution time estimator.";

pub const TIME_ESTIMATION_PROMPT_TEMPLATE: &str = r#"
Estimate how long it will take to resolve this support ticket:
Ticket: {subject}
Description: {description}

Historical Context:
{historical_context}

Estimate the resolution time in minutes and explain the factors that influenced your estimate.

Format your response as valid JSON with the following structure:
{
  "estimatedMinutes": 45,
  "confidence": 0.7,
  "factors": [
    {"name": "Technical complexity", "impact": 0.3},
    {"name": "Clear reproduction steps", "impact": -0.1},
    {"name": "Historical data from similar cases", "impact": 0.1}
  ]
}
"#;
