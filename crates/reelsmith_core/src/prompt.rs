//! Prompt templates for each operation.
//!
//! Inputs are interpolated verbatim; no escaping is applied. Each template
//! spells out the JSON shape the model is asked to return.

use crate::{
    ContentParams, OperationParams, OptimizeIdeaParams, RegenerateStrategyParams, StrategyParams,
    TrendingReelsParams,
};

/// Number of calendar entries a strategy must contain.
pub const CALENDAR_DAYS: usize = 30;
/// Number of hashtags in each strategy hashtag category.
pub const HASHTAGS_PER_CATEGORY: usize = 5;
/// Number of reel ideas requested by the trending reels prompt.
pub const TRENDING_IDEA_COUNT: usize = 10;

/// Build the prompt for validated operation inputs.
pub fn build_prompt(params: &OperationParams) -> String {
    match params {
        OperationParams::Strategy(p) => strategy_prompt(p),
        OperationParams::RegenerateStrategy(p) => regenerate_strategy_prompt(p),
        OperationParams::Content(p) => content_prompt(p),
        OperationParams::TrendingReels(p) => trending_reels_prompt(p),
        OperationParams::OptimizeIdea(p) => optimize_idea_prompt(p),
    }
}

/// Prompt for a full monthly content strategy.
pub fn strategy_prompt(params: &StrategyParams) -> String {
    format!(
        r#"
You are an expert social media strategist and content creator. Create a comprehensive content strategy for Instagram.

**Client Information:**
- Niche: {niche}
- Target Audience: {target_audience}
- Goals: {goals}
- Posting Frequency: {posting_frequency}

**Generate a detailed strategy including:**

1. **Content Pillars** (3-5 main themes)
   - List each pillar with a brief description
   - Explain why it resonates with the target audience

2. **Monthly Content Calendar** ({days} days)
   - Create a day-by-day posting schedule with exactly {days} entries, one per day
   - Include: Post Type (Reel/Post/Carousel), Topic, Hook/Caption idea, Best posting time
   - Distribute content across the pillars

3. **Hashtag Strategy**
   - Exactly {tags} niche-specific hashtags
   - Exactly {tags} trending/popular hashtags
   - Exactly {tags} engagement-focused hashtags

4. **Optimal Posting Times**
   - Best times to post based on target audience
   - Include specific hours and days

5. **Engagement Strategy**
   - Tips for increasing engagement
   - Call-to-action suggestions
   - Community building tactics

Respond with JSON only, using exactly these keys:
- content_pillars: array of objects with 'name' and 'description'
- calendar: array of exactly {days} objects with 'day', 'post_type', 'pillar', 'topic', 'hook', 'best_time'
- hashtags: object with 'niche', 'trending', 'engagement' arrays of exactly {tags} hashtags each
- posting_times: array of objects with 'day' and 'times'
- engagement_tips: array of strings

Make it actionable, specific to the niche, and optimized for Instagram's algorithm.
"#,
        niche = params.niche(),
        target_audience = params.target_audience(),
        goals = params.goals(),
        posting_frequency = params.posting_frequency(),
        days = CALENDAR_DAYS,
        tags = HASHTAGS_PER_CATEGORY,
    )
}

/// Prompt for rewriting a strategy according to client feedback.
pub fn regenerate_strategy_prompt(params: &RegenerateStrategyParams) -> String {
    format!(
        r#"
You are an expert social media strategist. A client is not satisfied with their current strategy and provided feedback.

**Current Strategy:**
{previous_strategy}

**Client Feedback:**
{feedback}

**Task:**
Regenerate and improve the strategy addressing the client's concerns. Maintain the same structure but:
1. Address all points mentioned in the feedback
2. Provide fresh, innovative ideas
3. Keep what worked well
4. Enhance weak areas

Respond with JSON only, in the same structure as before:
- content_pillars: array of objects with 'name' and 'description'
- calendar: array of exactly {days} objects with 'day', 'post_type', 'pillar', 'topic', 'hook', 'best_time'
- hashtags: object with 'niche', 'trending', 'engagement' arrays of exactly {tags} hashtags each
- posting_times: array of objects with 'day' and 'times'
- engagement_tips: array of strings

Make sure the new strategy directly addresses the feedback while maintaining professional quality.
"#,
        previous_strategy = params.previous_strategy(),
        feedback = params.feedback(),
        days = CALENDAR_DAYS,
        tags = HASHTAGS_PER_CATEGORY,
    )
}

/// Prompt for a single ready-to-publish post.
pub fn content_prompt(params: &ContentParams) -> String {
    format!(
        r#"
You are an expert Instagram content creator. Generate a complete post for Instagram.

**Content Brief:**
- Topic: {topic}
- Post Type: {post_type}
- Tone: {tone}
- Target Audience: {target_audience}

**Generate:**

1. **Caption** (engaging and optimized for Instagram)
   - Hook in the first line
   - Value-driven content
   - Clear call-to-action
   - Emojis where appropriate
   - 150-200 words

2. **Hashtags** (25-30 relevant hashtags)
   - Mix of popular and niche-specific
   - Categorized by size (high/medium/low volume)

3. **Visual Suggestions**
   - Description of what the image/video should show
   - Color scheme suggestions
   - Composition ideas

4. **Posting Recommendations**
   - Best time to post
   - Estimated engagement potential
   - Tips to boost performance

Format as JSON:
{{
  "caption": "...",
  "hashtags": ["...", "..."],
  "visual_suggestions": {{
    "description": "...",
    "colors": ["...", "..."],
    "composition": "..."
  }},
  "posting_recommendations": {{
    "best_time": "...",
    "engagement_tips": ["...", "..."]
  }}
}}
"#,
        topic = params.topic(),
        post_type = params.post_type(),
        tone = params.tone(),
        target_audience = params.target_audience(),
    )
}

/// Prompt for a batch of viral reel ideas.
pub fn trending_reels_prompt(params: &TrendingReelsParams) -> String {
    format!(
        r#"
You are a viral content strategist specializing in Instagram Reels.

**Client Info:**
- Niche: {niche}
- Target Audience: {target_audience}

**Task:** Generate exactly {count} trending Reel ideas that have high viral potential for this niche.

For each idea, provide:

1. **Title** - Catchy, attention-grabbing title
2. **Hook** (First 3 seconds) - What captures attention immediately
3. **Content Structure** - Step-by-step breakdown
4. **Trending Audio Suggestion** - Type of music/sound that works
5. **Visual Style** - How it should look
6. **Call-to-Action** - What action to prompt
7. **Viral Potential Score** - Rate 1-10 with explanation
8. **Estimated Engagement** - Expected likes/comments/shares

**Current Trends to Consider:**
- Educational content in entertaining format
- Behind-the-scenes
- Transformation/before-after
- Trending challenges adapted to niche
- Storytelling with emotional hooks

Format as a JSON array of {count} objects:
[
  {{
    "title": "...",
    "hook": "...",
    "structure": ["step1", "step2", "..."],
    "audio_suggestion": "...",
    "visual_style": "...",
    "call_to_action": "...",
    "viral_score": 8,
    "viral_explanation": "...",
    "estimated_engagement": "..."
  }},
  ...
]

Make ideas specific, actionable, and optimized for current Instagram algorithm.
"#,
        niche = params.niche(),
        target_audience = params.target_audience(),
        count = TRENDING_IDEA_COUNT,
    )
}

/// Prompt for improving an existing idea toward a goal.
pub fn optimize_idea_prompt(params: &OptimizeIdeaParams) -> String {
    format!(
        r#"
You are an expert content optimizer for Instagram.

**Original Idea:**
{idea_content}

**Optimization Goal:**
{goal}

**Task:** Improve and optimize this content idea to maximize {goal}.

Provide:

1. **Optimized Version** - Improved iteration of the idea
2. **Key Changes** - What was changed and why
3. **Enhancement Suggestions** - Additional ways to improve
4. **A/B Testing Ideas** - Variations to test
5. **Success Metrics** - What to measure

Format as JSON:
{{
  "optimized_content": {{
    "title": "...",
    "description": "...",
    "implementation": ["step1", "step2", "..."]
  }},
  "key_changes": ["change1", "change2", "..."],
  "enhancements": ["tip1", "tip2", "..."],
  "ab_test_variations": [
    {{"variation": "A", "description": "..."}},
    {{"variation": "B", "description": "..."}}
  ],
  "success_metrics": ["metric1", "metric2", "..."]
}}

Focus on practical, implementable improvements that align with Instagram's best practices.
"#,
        idea_content = params.idea_content(),
        goal = params.optimization_goal(),
    )
}
