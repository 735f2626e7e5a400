#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AudioFormat {
    Wav,
    Ogg,
    Webm,
    Mpeg,
    Mp4,
    Unknown,
}

impl AudioFormat {
    pub fn from_mime(mime: &str) -> Self {
        let essence = mime
            .split(';')
            .next()
            .unwrap_or_default()
            .trim()
            .to_ascii_lowercase();
        match essence.as_str() {
            "audio/wav" | "audio/wave" | "audio/x-wav" | "audio/vnd.wave" => Self::Wav,
            "audio/ogg" | "application/ogg" => Self::Ogg,
            "audio/webm" | "video/webm" => Self::Webm,
            "audio/mpeg" | "audio/mp3" => Self::Mpeg,
            "audio/mp4" | "audio/m4a" | "audio/x-m4a" => Self::Mp4,
            _ => Self::Unknown,
        }
    }

    pub fn sniff(bytes: &[u8]) -> Self {
        if bytes.len() >= 12 && &bytes[0..4] == b"RIFF" && &bytes[8..12] == b"WAVE" {
            Self::Wav
        } else if bytes.starts_with(b"OggS") {
            Self::Ogg
        } else if bytes.starts_with(&[0x1A, 0x45, 0xDF, 0xA3]) {
            Self::Webm
        } else if bytes.starts_with(b"ID3") || bytes.starts_with(&[0xFF, 0xFB]) {
            Self::Mpeg
        } else {
            Self::Unknown
        }
    }
}

/// Uploaded recording together with the MIME type the client declared.
#[derive(Debug, Clone)]
pub struct AudioClip {
    pub bytes: Vec<u8>,
    pub mime: String,
    format: AudioFormat,
}

impl AudioClip {
    pub fn new(bytes: Vec<u8>, mime: Option<&str>) -> Self {
        let mime = mime.unwrap_or("application/octet-stream").to_string();
        let declared = AudioFormat::from_mime(&mime);
        let format = match declared {
            AudioFormat::Unknown => AudioFormat::sniff(&bytes),
            known => known,
        };
        Self {
            bytes,
            mime,
            format,
        }
    }

    pub fn format(&self) -> AudioFormat {
        self.format
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Filename handed to multipart transcription APIs, which detect the
    /// container from the extension.
    pub fn file_name_hint(&self) -> &'static str {
        match self.format {
            AudioFormat::Wav => "audio.wav",
            AudioFormat::Ogg => "audio.ogg",
            AudioFormat::Webm => "audio.webm",
            AudioFormat::Mpeg => "audio.mp3",
            AudioFormat::Mp4 => "audio.m4a",
            AudioFormat::Unknown => "audio.bin",
        }
    }

    pub fn upload_mime(&self) -> &'static str {
        match self.format {
            AudioFormat::Wav => "audio/wav",
            AudioFormat::Ogg => "audio/ogg",
            AudioFormat::Webm => "audio/webm",
            AudioFormat::Mpeg => "audio/mpeg",
            AudioFormat::Mp4 => "audio/mp4",
            AudioFormat::Unknown => "application/octet-stream",
        }
    }

    /// Content-Type header for the speech REST endpoints.
    pub fn speech_content_type(&self) -> &'static str {
        match self.format {
            AudioFormat::Wav => "audio/wav; codecs=audio/pcm; samplerate=16000",
            AudioFormat::Ogg => "audio/ogg; codecs=opus",
            AudioFormat::Webm => "audio/webm; codecs=opus",
            _ => "application/octet-stream",
        }
    }

    /// `format` value of an `input_audio` chat content part.
    pub fn input_audio_format(&self) -> Option<&'static str> {
        match self.format {
            AudioFormat::Wav => Some("wav"),
            AudioFormat::Mpeg => Some("mp3"),
            _ => None,
        }
    }
}
