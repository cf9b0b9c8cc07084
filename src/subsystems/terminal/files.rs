//! Read-only virtual filesystem behind `ls` and `cat`.

const FILES: &[(&str, &str)] = &[
    (
        "about.txt",
        "Name:     Sagar Harsora
Role:     Software Engineer
Location: Mumbai, IN
Status:   Available

I enjoy sidequesting and building things with LLMs.
Currently working at Vibe Engine on Generative Engine Optimization.",
    ),
    (
        "stack.txt",
        "Languages:   TypeScript, Python
Frontend:    Next.js, React, Tailwind
Backend:     Node.js, FastAPI
AI/ML:       OpenAI, Anthropic, LangChain
Infra:       Vercel, Supabase, Railway
Editor:      Cursor
Terminal:    Warp",
    ),
    (
        "links.txt",
        "GitHub:    https://github.com/sagarrh
Twitter:   https://twitter.com/SagarHarsora13
Instagram: https://instagram.com/sagarr.h
Email:     harsorasagar04@gmail.com
Work:      https://vibe-engine.ai",
    ),
    (
        "now.txt",
        "What I'm doing right now:

→ Building at Vibe Engine
→ Experimenting with AI agents
→ Reading: thinking about latent space
→ Listening to too much music

Last updated: Feb 2026",
    ),
];

/// File names in listing order.
pub fn names() -> impl Iterator<Item = &'static str> {
    FILES.iter().map(|(name, _)| *name)
}

/// Exact contents of `name`. Names are case-sensitive.
pub fn read(name: &str) -> Option<&'static str> {
    FILES
        .iter()
        .find(|(n, _)| *n == name)
        .map(|(_, text)| *text)
}
