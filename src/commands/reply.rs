//! What a command sends back to the channel.

use serenity::builder::CreateEmbed;
use serenity::utils::Colour;

pub const RED: Colour = Colour(0xED4245);
pub const GREEN: Colour = Colour(0x57F287);
pub const BLUE: Colour = Colour(0x3498DB);

#[derive(Debug, Clone, PartialEq)]
pub enum Reply {
    /// Plain reply to the invoking message
    Text(String),
    /// Embed sent to the channel
    Embed(EmbedReply),
    /// Latency check; measured while sending
    Pong,
}

#[derive(Debug, Clone, PartialEq)]
pub struct EmbedReply {
    pub title: String,
    pub description: String,
    pub colour: Colour,
    pub fields: Vec<(String, String)>,
}

impl EmbedReply {
    pub fn new(title: impl Into<String>, description: impl Into<String>, colour: Colour) -> Self {
        EmbedReply {
            title: title.into(),
            description: description.into(),
            colour,
            fields: Vec::new(),
        }
    }

    pub fn field(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.fields.push((name.into(), value.into()));
        self
    }

    pub fn apply<'e>(&self, embed: &'e mut CreateEmbed) -> &'e mut CreateEmbed {
        embed
            .title(&self.title)
            .description(&self.description)
            .colour(self.colour);
        for (name, value) in &self.fields {
            embed.field(name, value, false);
        }
        embed
    }
}
