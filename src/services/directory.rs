//! Built-in school and major lists offered during onboarding.

use crate::models::user::School;

const MAX_SCHOOL_RESULTS: usize = 50;

const fn school(name: &'static str, state: &'static str, kind: &'static str) -> School {
    School { name, state, kind }
}

pub static SCHOOLS: &[School] = &[
    // Ivy League
    school("Harvard University", "MA", "Private"),
    school("Yale University", "CT", "Private"),
    school("Princeton University", "NJ", "Private"),
    school("Columbia University", "NY", "Private"),
    school("University of Pennsylvania", "PA", "Private"),
    school("Brown University", "RI", "Private"),
    school("Dartmouth College", "NH", "Private"),
    school("Cornell University", "NY", "Private"),
    // Top Public Universities
    school("University of California, Berkeley", "CA", "Public"),
    school("University of California, Los Angeles", "CA", "Public"),
    school("University of Michigan", "MI", "Public"),
    school("University of Virginia", "VA", "Public"),
    school("University of North Carolina at Chapel Hill", "NC", "Public"),
    school("Georgia Institute of Technology", "GA", "Public"),
    school("University of Texas at Austin", "TX", "Public"),
    school("University of Wisconsin-Madison", "WI", "Public"),
    school("University of Illinois Urbana-Champaign", "IL", "Public"),
    school("University of Washington", "WA", "Public"),
    school("Ohio State University", "OH", "Public"),
    school("Penn State University", "PA", "Public"),
    school("University of Florida", "FL", "Public"),
    school("University of Maryland", "MD", "Public"),
    school("Purdue University", "IN", "Public"),
    school("University of Minnesota", "MN", "Public"),
    school("Indiana University Bloomington", "IN", "Public"),
    school("Michigan State University", "MI", "Public"),
    school("Arizona State University", "AZ", "Public"),
    school("University of Arizona", "AZ", "Public"),
    school("University of Colorado Boulder", "CO", "Public"),
    school("Rutgers University", "NJ", "Public"),
    school("University of Pittsburgh", "PA", "Public"),
    school("University of Iowa", "IA", "Public"),
    school("University of Oregon", "OR", "Public"),
    school("University of Utah", "UT", "Public"),
    // Top Private Universities
    school("Stanford University", "CA", "Private"),
    school("Massachusetts Institute of Technology", "MA", "Private"),
    school("California Institute of Technology", "CA", "Private"),
    school("Duke University", "NC", "Private"),
    school("Northwestern University", "IL", "Private"),
    school("University of Chicago", "IL", "Private"),
    school("Johns Hopkins University", "MD", "Private"),
    school("Vanderbilt University", "TN", "Private"),
    school("Rice University", "TX", "Private"),
    school("Washington University in St. Louis", "MO", "Private"),
    school("Emory University", "GA", "Private"),
    school("University of Notre Dame", "IN", "Private"),
    school("Georgetown University", "DC", "Private"),
    school("Carnegie Mellon University", "PA", "Private"),
    school("University of Southern California", "CA", "Private"),
    school("New York University", "NY", "Private"),
    school("Boston University", "MA", "Private"),
    school("Boston College", "MA", "Private"),
    school("Tufts University", "MA", "Private"),
    school("Wake Forest University", "NC", "Private"),
    school("University of Rochester", "NY", "Private"),
    school("Brandeis University", "MA", "Private"),
    school("Case Western Reserve University", "OH", "Private"),
    school("Northeastern University", "MA", "Private"),
    school("Tulane University", "LA", "Private"),
    school("University of Miami", "FL", "Private"),
    school("Lehigh University", "PA", "Private"),
    school("Rensselaer Polytechnic Institute", "NY", "Private"),
    school("Santa Clara University", "CA", "Private"),
    school("Syracuse University", "NY", "Private"),
    school("Villanova University", "PA", "Private"),
    school("George Washington University", "DC", "Private"),
    school("Fordham University", "NY", "Private"),
    school("Southern Methodist University", "TX", "Private"),
    school("Pepperdine University", "CA", "Private"),
    // More state universities
    school("University of California, San Diego", "CA", "Public"),
    school("University of California, Davis", "CA", "Public"),
    school("University of California, Santa Barbara", "CA", "Public"),
    school("University of California, Irvine", "CA", "Public"),
    school("University of California, Santa Cruz", "CA", "Public"),
    school("University of California, Riverside", "CA", "Public"),
    school("University of California, Merced", "CA", "Public"),
    school("San Diego State University", "CA", "Public"),
    school("San Jose State University", "CA", "Public"),
    school("California State University, Long Beach", "CA", "Public"),
    school("California Polytechnic State University", "CA", "Public"),
    school("San Francisco State University", "CA", "Public"),
    school("University of Alabama", "AL", "Public"),
    school("Auburn University", "AL", "Public"),
    school("University of Arkansas", "AR", "Public"),
    school("University of Connecticut", "CT", "Public"),
    school("University of Delaware", "DE", "Public"),
    school("Florida State University", "FL", "Public"),
    school("University of Central Florida", "FL", "Public"),
    school("University of South Florida", "FL", "Public"),
    school("University of Georgia", "GA", "Public"),
    school("University of Hawaii", "HI", "Public"),
    school("Boise State University", "ID", "Public"),
    school("University of Idaho", "ID", "Public"),
    school("University of Kansas", "KS", "Public"),
    school("Kansas State University", "KS", "Public"),
    school("University of Kentucky", "KY", "Public"),
    school("Louisiana State University", "LA", "Public"),
    school("University of Maine", "ME", "Public"),
    school("University of Massachusetts Amherst", "MA", "Public"),
    school("University of Mississippi", "MS", "Public"),
    school("Mississippi State University", "MS", "Public"),
    school("University of Missouri", "MO", "Public"),
    school("University of Montana", "MT", "Public"),
    school("University of Nebraska-Lincoln", "NE", "Public"),
    school("University of Nevada, Las Vegas", "NV", "Public"),
    school("University of Nevada, Reno", "NV", "Public"),
    school("University of New Hampshire", "NH", "Public"),
    school("University of New Mexico", "NM", "Public"),
    school("SUNY Buffalo", "NY", "Public"),
    school("SUNY Stony Brook", "NY", "Public"),
    school("SUNY Binghamton", "NY", "Public"),
    school("North Carolina State University", "NC", "Public"),
    school("University of North Dakota", "ND", "Public"),
    school("University of Oklahoma", "OK", "Public"),
    school("Oklahoma State University", "OK", "Public"),
    school("Oregon State University", "OR", "Public"),
    school("Temple University", "PA", "Public"),
    school("University of Rhode Island", "RI", "Public"),
    school("Clemson University", "SC", "Public"),
    school("University of South Carolina", "SC", "Public"),
    school("University of South Dakota", "SD", "Public"),
    school("University of Tennessee", "TN", "Public"),
    school("Texas A&M University", "TX", "Public"),
    school("Texas Tech University", "TX", "Public"),
    school("University of Houston", "TX", "Public"),
    school("Utah State University", "UT", "Public"),
    school("University of Vermont", "VT", "Public"),
    school("Virginia Tech", "VA", "Public"),
    school("Washington State University", "WA", "Public"),
    school("West Virginia University", "WV", "Public"),
    school("University of Wyoming", "WY", "Public"),
    // Liberal Arts Colleges
    school("Williams College", "MA", "Private"),
    school("Amherst College", "MA", "Private"),
    school("Swarthmore College", "PA", "Private"),
    school("Wellesley College", "MA", "Private"),
    school("Pomona College", "CA", "Private"),
    school("Bowdoin College", "ME", "Private"),
    school("Middlebury College", "VT", "Private"),
    school("Claremont McKenna College", "CA", "Private"),
    school("Carleton College", "MN", "Private"),
    school("Davidson College", "NC", "Private"),
    school("Haverford College", "PA", "Private"),
    school("Colby College", "ME", "Private"),
    school("Hamilton College", "NY", "Private"),
    school("Harvey Mudd College", "CA", "Private"),
    school("Wesleyan University", "CT", "Private"),
    school("Grinnell College", "IA", "Private"),
    school("Vassar College", "NY", "Private"),
    school("Colgate University", "NY", "Private"),
    school("Oberlin College", "OH", "Private"),
    school("Barnard College", "NY", "Private"),
    // Community Colleges
    school("Other / Community College", "", "Community"),
    school("High School", "", "High School"),
    school("Not Currently Enrolled", "", "Other"),
];

pub static MAJORS: &[&str] = &[
    // STEM
    "Computer Science",
    "Software Engineering",
    "Computer Engineering",
    "Electrical Engineering",
    "Mechanical Engineering",
    "Civil Engineering",
    "Chemical Engineering",
    "Biomedical Engineering",
    "Aerospace Engineering",
    "Data Science",
    "Information Technology",
    "Cybersecurity",
    "Mathematics",
    "Statistics",
    "Physics",
    "Chemistry",
    "Biology",
    "Biochemistry",
    "Neuroscience",
    "Environmental Science",
    // Business
    "Business Administration",
    "Finance",
    "Accounting",
    "Marketing",
    "Management",
    "Economics",
    "Entrepreneurship",
    "International Business",
    "Supply Chain Management",
    "Human Resources",
    // Health & Medicine
    "Pre-Medicine",
    "Nursing",
    "Public Health",
    "Health Sciences",
    "Pharmacy",
    "Physical Therapy",
    "Kinesiology",
    // Arts & Humanities
    "English",
    "Creative Writing",
    "Communications",
    "Journalism",
    "Film Studies",
    "Art History",
    "Studio Art",
    "Graphic Design",
    "Music",
    "Theater",
    "Philosophy",
    "History",
    "Religious Studies",
    // Social Sciences
    "Psychology",
    "Sociology",
    "Political Science",
    "International Relations",
    "Anthropology",
    "Criminal Justice",
    "Social Work",
    "Education",
    // Languages
    "Spanish",
    "French",
    "German",
    "Chinese",
    "Japanese",
    "Linguistics",
    // Other
    "Architecture",
    "Urban Planning",
    "Agriculture",
    "Hospitality Management",
    "Sports Management",
    "Undeclared",
    "Other",
];

fn matches(haystack: &str, query: &str) -> bool {
    haystack.to_lowercase().contains(query)
}

/// Schools whose name contains `query`, case-insensitively, capped at 50.
pub fn search_schools(query: &str) -> Vec<School> {
    let query = query.to_lowercase();
    SCHOOLS
        .iter()
        .filter(|s| query.is_empty() || matches(s.name, &query))
        .take(MAX_SCHOOL_RESULTS)
        .cloned()
        .collect()
}

pub fn search_majors(query: &str) -> Vec<&'static str> {
    let query = query.to_lowercase();
    MAJORS
        .iter()
        .copied()
        .filter(|m| query.is_empty() || matches(m, &query))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn school_search_is_case_insensitive() {
        let found = search_schools("STANFORD");
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].name, "Stanford University");
    }

    #[test]
    fn empty_query_is_capped() {
        assert_eq!(search_schools("").len(), MAX_SCHOOL_RESULTS.min(SCHOOLS.len()));
        assert_eq!(search_majors("").len(), MAJORS.len());
    }

    #[test]
    fn major_search_matches_substrings() {
        let found = search_majors("engineering");
        assert!(found.contains(&"Software Engineering"));
        assert!(!found.contains(&"Computer Science"));
    }
}
