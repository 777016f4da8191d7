//! Prompt rendering for each generation kind.

use crate::generation::request::{DayIdeaRequest, ScriptRequest, WeeklyPostsRequest};
use crate::week::{day_label, WEEK};

pub const IDEA_SYSTEM_PROMPT: &str =
    "You are a creative content strategist specializing in generating engaging reel ideas.";

pub const SCRIPT_SYSTEM_PROMPT: &str =
    "You are a social media expert specializing in creating engaging reels.";

pub const POSTS_SYSTEM_PROMPT: &str =
    "You are an expert social media manager specializing in short-form post strategy and creation.";

fn tone_clause(tone: Option<&str>) -> String {
    match tone {
        Some(tone) => format!(
            "The desired voice and tone is: \"{}\". Adapt vocabulary, sentence structure, emotional vibe, and formality to match it.",
            tone
        ),
        None => "Adopt a generally engaging, modern, clear, and concise tone.".to_string(),
    }
}

pub fn render_idea_prompt(request: &DayIdeaRequest) -> String {
    let mut prompt = format!(
        "Based on the content creator's niche and the day of the week, generate a unique reel title and a compelling one-line idea.\n\n\
         Niche: {}\n\
         Day of the week: {}\n",
        request.niche, request.day
    );
    if let Some(series) = &request.series_name {
        prompt.push_str(&format!(
            "This reel is part of the \"{}\" series; keep the idea consistent with it.\n",
            series
        ));
    }
    prompt.push_str(&tone_clause(request.tone.as_deref()));
    prompt.push_str(
        "\n\nRespond with JSON only: {\"title\": string, \"one_line_idea\": string}.",
    );
    prompt
}

pub fn render_script_prompt(request: &ScriptRequest) -> String {
    let mut prompt = format!(
        "Based on the reel idea and the creator's niche, generate a short reel script, a ready-to-use caption, and a list of trending hashtags.\n\n\
         User Niche: {}\n\
         Reel Title: {}\n\
         Reel Idea: {}\n",
        request.niche, request.title, request.one_line_idea
    );
    if let Some(series) = &request.series_name {
        prompt.push_str(&format!(
            "This reel is part of the \"{series}\" series.\n\
             - Mention the series name naturally within the script where appropriate.\n\
             - Include the series name or a series-specific hashtag in the caption.\n\
             - Include a series-specific hashtag in the tags (e.g. #{series}).\n",
        ));
    }
    prompt.push_str(&tone_clause(request.tone.as_deref()));
    prompt.push_str(
        "\n\nThe script should be concise and suited to a short-form vertical video. \
         The caption should be short and attention-grabbing.\n\
         Respond with JSON only: {\"script\": string, \"caption\": string, \"tags\": [string]}.",
    );
    prompt
}

pub fn render_posts_prompt(request: &WeeklyPostsRequest) -> String {
    let per_day = request.posts_per_day.get();
    let days: Vec<&str> = WEEK.iter().map(|day| day_label(*day)).collect();
    format!(
        "Generate a 7-day content schedule of posts. For each day from Monday to Sunday, generate {per_day} unique post(s).\n\n\
         The main topic/theme for the week is:\n\"{topic}\"\n\n\
         The content strategy to follow is: \"{strategy}\". {guidance}\n\n\
         {tone}\n\n\
         Each post should be well-crafted, relatively short, and engaging. Include relevant hashtags where appropriate.\n\
         The output must contain exactly 7 entries, one per day in order ({days}).\n\
         Respond with JSON only: {{\"schedule\": [{{\"day\": string, \"posts\": [string]}}]}}.",
        per_day = per_day,
        topic = request.topic,
        strategy = request.strategy.label(),
        guidance = request.strategy.guidance(),
        tone = tone_clause(request.tone.as_deref()),
        days = days.join(", "),
    )
}
