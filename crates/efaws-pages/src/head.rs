//! Document head management.
//!
//! [`apply_metadata`] sets the document title and upserts the SEO tags of a
//! route: an existing tag with the identifying attribute is updated in
//! place, a missing one is created. Repeated calls never duplicate tags.

use crate::dom::{Dom, DomError, Selector};

/// Error type for head updates.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum HeadError {
	/// A tag could not be updated or created.
	#[error("Failed to update {tag}: {source}")]
	Tag {
		/// Description of the tag, e.g. `meta[property="og:title"]`.
		tag: String,
		/// Underlying host error.
		#[source]
		source: DomError,
	},
}

/// SEO metadata of a page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageMetadata {
	/// Document title.
	pub title: &'static str,
	/// `meta[name="description"]`
	pub description: &'static str,
	/// `meta[name="keywords"]`
	pub keywords: &'static str,
	/// `link[rel="canonical"]`, also used for `og:url` and `twitter:url`.
	pub canonical: &'static str,
	/// `og:title` and `twitter:title`
	pub og_title: &'static str,
	/// `og:description` and `twitter:description`
	pub og_description: &'static str,
	/// `og:image` and `twitter:image`
	pub og_image: &'static str,
}

/// Metadata of the home page, also used for unknown routes.
pub const HOME_METADATA: PageMetadata = PageMetadata {
	title: "E-Faws Tech Services - AI Solutions for Small Business | India's #1 AI Partner",
	description: "Transform your business with AI! E-Faws Tech Services offers WhatsApp AI assistants, business automation, and 150+ AI tools. Serving 1000+ businesses in Coimbatore & Bangalore.",
	keywords: "AI solutions India, WhatsApp AI assistant, business automation, AI tools small business, artificial intelligence services, Coimbatore AI company",
	canonical: "https://efawstech.com/",
	og_title: "E-Faws Tech Services - AI Solutions for Small Business | India's #1 AI Partner",
	og_description: "Transform your business with AI! WhatsApp AI assistants, business automation, and 150+ AI tools. Serving 1000+ businesses.",
	og_image: "https://efawstech.com/static/images/Services/ai_img.png",
};

static SITE_METADATA: [(&str, PageMetadata); 6] = [
	("/", HOME_METADATA),
	(
		"/about",
		PageMetadata {
			title: "About E-Faws Tech Services - Leading AI Solutions Company in India",
			description: "Learn about E-Faws Tech Services, India's leading AI solutions provider. Founded in Coimbatore, serving 1000+ businesses with cutting-edge AI technology and automation.",
			keywords: "about E-Faws, AI company India, artificial intelligence services, Coimbatore tech company, AI solutions provider, business automation experts",
			canonical: "https://efawstech.com/about",
			og_title: "About E-Faws Tech Services - Leading AI Solutions Company",
			og_description: "India's leading AI solutions provider serving 1000+ businesses with cutting-edge AI technology and automation.",
			og_image: "https://efawstech.com/static/images/team-member2.png",
		},
	),
	(
		"/services",
		PageMetadata {
			title: "AI Services & Solutions - WhatsApp AI, Automation & Digital Marketing",
			description: "Explore E-Faws Tech Services comprehensive AI solutions: WhatsApp AI assistants, business automation, digital marketing, and 150+ AI tools for business growth.",
			keywords: "AI services, WhatsApp AI assistant, business automation services, digital marketing AI, AI tools, artificial intelligence solutions, automation services",
			canonical: "https://efawstech.com/services",
			og_title: "AI Services & Solutions - WhatsApp AI, Automation & Digital Marketing",
			og_description: "Comprehensive AI solutions: WhatsApp AI assistants, business automation, digital marketing, and 150+ AI tools for business growth.",
			og_image: "https://efawstech.com/static/images/Services/ai_img.png",
		},
	),
	(
		"/internship",
		PageMetadata {
			title: "AI Internship Program - Learn Artificial Intelligence at E-Faws Tech",
			description: "Join E-Faws Tech Services AI internship program. Learn practical AI skills, work on real projects, and kickstart your career in artificial intelligence and automation.",
			keywords: "AI internship, artificial intelligence training, AI learning program, tech internship India, AI career, machine learning internship",
			canonical: "https://efawstech.com/internship",
			og_title: "AI Internship Program - Learn Artificial Intelligence",
			og_description: "Join our AI internship program. Learn practical AI skills, work on real projects, and kickstart your career in artificial intelligence.",
			og_image: "https://efawstech.com/static/images/Services/ai_img.png",
		},
	),
	(
		"/blog",
		PageMetadata {
			title: "AI Insights & Resources - Latest Trends in Artificial Intelligence",
			description: "Stay updated with latest AI trends, insights, and resources. Expert articles on artificial intelligence, business automation, and digital transformation.",
			keywords: "AI blog, artificial intelligence insights, AI trends, business automation tips, AI resources, machine learning articles, AI news",
			canonical: "https://efawstech.com/blog",
			og_title: "AI Insights & Resources - Latest Trends in Artificial Intelligence",
			og_description: "Stay updated with latest AI trends, insights, and resources. Expert articles on artificial intelligence and business automation.",
			og_image: "https://efawstech.com/static/images/Services/aibook.jpg",
		},
	),
	(
		"/contact",
		PageMetadata {
			title: "Contact E-Faws Tech Services - Get Your AI Solutions Today",
			description: "Contact E-Faws Tech Services for AI solutions. Located in Coimbatore & Bangalore. Call +91-63802-13834 or email efawstech@gmail.com for business automation.",
			keywords: "contact E-Faws, AI solutions contact, Coimbatore AI company contact, Bangalore AI services, AI consultation, business automation contact",
			canonical: "https://efawstech.com/contact",
			og_title: "Contact E-Faws Tech Services - Get Your AI Solutions Today",
			og_description: "Contact us for AI solutions. Located in Coimbatore & Bangalore. Expert AI consultation and business automation services.",
			og_image: "https://efawstech.com/static/images/logo.png",
		},
	),
];

/// Returns the metadata of `path`, falling back to the home page.
pub fn metadata_for(path: &str) -> &'static PageMetadata {
	SITE_METADATA
		.iter()
		.find(|(route, _)| *route == path)
		.map(|(_, metadata)| metadata)
		.unwrap_or(&SITE_METADATA[0].1)
}

/// Attribute identifying a `<meta>` tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MetaAttribute {
	/// `name="..."`
	Name,
	/// `property="..."`
	Property,
}

impl MetaAttribute {
	/// Returns the attribute name.
	pub fn as_str(&self) -> &'static str {
		match self {
			Self::Name => "name",
			Self::Property => "property",
		}
	}
}

fn upsert<D: Dom>(
	dom: &D,
	tag: &str,
	key_attribute: &str,
	key: &str,
	value_attribute: &str,
	value: &str,
) -> Result<(), HeadError> {
	let selector = Selector::tag_attribute(tag, key_attribute, key);
	let result = match dom.query(&selector) {
		Some(existing) => dom.set_attribute(&existing, value_attribute, value),
		None => dom
			.append_to_head(tag, &[(key_attribute, key), (value_attribute, value)])
			.map(|_| ()),
	};

	result.map_err(|source| HeadError::Tag {
		tag: selector.to_css(),
		source,
	})
}

/// Sets the `content` of `<meta {attribute}="{key}">`, creating the tag if needed.
pub fn upsert_meta<D: Dom>(
	dom: &D,
	attribute: MetaAttribute,
	key: &str,
	content: &str,
) -> Result<(), HeadError> {
	upsert(dom, "meta", attribute.as_str(), key, "content", content)
}

/// Sets the `href` of `<link rel="canonical">`, creating the tag if needed.
pub fn upsert_canonical<D: Dom>(dom: &D, href: &str) -> Result<(), HeadError> {
	upsert(dom, "link", "rel", "canonical", "href", href)
}

/// Applies the metadata of `path` to the document head.
pub fn apply_metadata<D: Dom>(dom: &D, path: &str) -> Result<&'static PageMetadata, HeadError> {
	let metadata = metadata_for(path);

	dom.set_title(metadata.title);

	upsert_meta(dom, MetaAttribute::Name, "description", metadata.description)?;
	upsert_meta(dom, MetaAttribute::Name, "keywords", metadata.keywords)?;

	let social = [
		("og:title", metadata.og_title),
		("og:description", metadata.og_description),
		("og:image", metadata.og_image),
		("og:url", metadata.canonical),
		("twitter:title", metadata.og_title),
		("twitter:description", metadata.og_description),
		("twitter:image", metadata.og_image),
		("twitter:url", metadata.canonical),
	];
	for (key, content) in social {
		upsert_meta(dom, MetaAttribute::Property, key, content)?;
	}

	upsert_canonical(dom, metadata.canonical)?;

	Ok(metadata)
}
