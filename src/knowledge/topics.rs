//! Learning assistant knowledge base: topics, canned code examples, and
//! the templated text fragments the explanation builder stitches together.

use crate::engines::Difficulty;

pub struct Resource {
    pub title: &'static str,
    pub url: &'static str,
    pub kind: &'static str,
}

pub struct Topic {
    pub name: &'static str,
    pub concepts: &'static [&'static str],
    pub difficulty: Difficulty,
    pub prerequisites: &'static [&'static str],
    pub resources: &'static [Resource],
}

pub const TOPICS: &[Topic] = &[
    Topic {
        name: "React",
        concepts: &["Components", "JSX", "Props", "State", "Hooks", "Context", "Lifecycle"],
        difficulty: Difficulty::Intermediate,
        prerequisites: &["JavaScript", "HTML", "CSS"],
        resources: &[
            Resource { title: "React Official Documentation", url: "https://react.dev", kind: "documentation" },
            Resource { title: "React Tutorial for Beginners", url: "#", kind: "tutorial" },
            Resource { title: "React Best Practices", url: "#", kind: "guide" },
        ],
    },
    Topic {
        name: "Node.js",
        concepts: &["Event Loop", "Modules", "NPM", "Express", "Async/Await", "File System"],
        difficulty: Difficulty::Intermediate,
        prerequisites: &["JavaScript"],
        resources: &[
            Resource { title: "Node.js Documentation", url: "https://nodejs.org/docs", kind: "documentation" },
            Resource { title: "Node.js Complete Guide", url: "#", kind: "course" },
            Resource { title: "Express.js Tutorial", url: "#", kind: "tutorial" },
        ],
    },
    Topic {
        name: "Python",
        concepts: &["Syntax", "Data Types", "Functions", "Classes", "Modules", "Exception Handling"],
        difficulty: Difficulty::Beginner,
        prerequisites: &[],
        resources: &[
            Resource { title: "Python Official Tutorial", url: "https://docs.python.org/tutorial/", kind: "documentation" },
            Resource { title: "Python for Beginners", url: "#", kind: "course" },
            Resource { title: "Python Best Practices", url: "#", kind: "guide" },
        ],
    },
    Topic {
        name: "Machine Learning",
        concepts: &["Supervised Learning", "Unsupervised Learning", "Neural Networks", "Feature Engineering", "Model Evaluation"],
        difficulty: Difficulty::Advanced,
        prerequisites: &["Python", "Statistics", "Linear Algebra"],
        resources: &[
            Resource { title: "Machine Learning Course", url: "#", kind: "course" },
            Resource { title: "Scikit-learn Documentation", url: "https://scikit-learn.org", kind: "documentation" },
            Resource { title: "ML Best Practices", url: "#", kind: "guide" },
        ],
    },
    Topic {
        name: "Database",
        concepts: &["SQL", "Normalization", "Indexing", "Transactions", "NoSQL", "ACID Properties"],
        difficulty: Difficulty::Intermediate,
        prerequisites: &[],
        resources: &[
            Resource { title: "SQL Tutorial", url: "#", kind: "tutorial" },
            Resource { title: "Database Design Principles", url: "#", kind: "guide" },
            Resource { title: "MongoDB Documentation", url: "https://docs.mongodb.com", kind: "documentation" },
        ],
    },
];

/// Ordered trigger phrases for question-type classification. First match
/// wins, so "how to" must stay ahead of broader triggers.
pub const QUESTION_TRIGGERS: &[(&str, &str)] = &[
    ("how to", "implementation"),
    ("what is", "concept"),
    ("why", "explanation"),
    ("when to use", "usage"),
    ("best practices", "practices"),
    ("error", "troubleshooting"),
    ("debug", "troubleshooting"),
];

/// One-line explanations for well-known concepts; anything else gets a
/// generic line naming its topic.
pub const CONCEPT_EXPLANATIONS: &[(&str, &str)] = &[
    ("Components", "Reusable pieces of UI that encapsulate their own logic and styling"),
    ("JSX", "A syntax extension that allows you to write HTML-like code in JavaScript"),
    ("Props", "Data passed from parent to child components to customize behavior"),
    ("State", "Internal data that components manage and can change over time"),
    ("Hooks", "Functions that let you use state and lifecycle features in functional components"),
    ("Event Loop", "The mechanism that handles asynchronous operations in JavaScript"),
    ("Modules", "Reusable pieces of code that can be imported and exported"),
    ("Supervised Learning", "ML technique where models learn from labeled training data"),
    ("SQL", "Structured Query Language for managing and querying relational databases"),
];

pub const PRACTICAL_APPLICATIONS: &[(&str, &str)] = &[
    ("React", "Build interactive user interfaces for web applications, create reusable components, and manage application state effectively."),
    ("Node.js", "Create server-side applications, build REST APIs, handle file operations, and manage real-time communications."),
    ("Python", "Develop web applications, automate tasks, analyze data, and build machine learning models."),
    ("Machine Learning", "Build predictive models, classify data, detect patterns, and make data-driven decisions."),
    ("Database", "Store and retrieve data efficiently, ensure data integrity, and optimize query performance."),
];

pub const COMMON_PITFALLS: &[(&str, &str)] = &[
    ("React", "• Mutating state directly instead of using setState\n• Not using keys properly in lists\n• Creating functions inside render methods"),
    ("Node.js", "• Not handling errors in async operations\n• Blocking the event loop with synchronous operations\n• Memory leaks from unclosed connections"),
    ("Python", "• Not following PEP 8 style guidelines\n• Using mutable default arguments\n• Not handling exceptions properly"),
    ("Machine Learning", "• Overfitting models to training data\n• Not preprocessing data properly\n• Ignoring feature scaling and normalization"),
    ("Database", "• Not using indexes effectively\n• Poor database schema design\n• Not handling concurrent access properly"),
];

pub const RELATED_CONCEPTS: &[(&str, &[&str])] = &[
    ("React", &["JavaScript", "HTML", "CSS", "State Management", "Component Lifecycle"]),
    ("Node.js", &["JavaScript", "Express", "NPM", "Async Programming", "REST APIs"]),
    ("Python", &["Data Types", "Object-Oriented Programming", "Libraries", "Package Management"]),
    ("Machine Learning", &["Statistics", "Data Science", "Neural Networks", "Feature Engineering"]),
    ("Database", &["SQL", "Data Modeling", "Indexing", "Transactions", "Performance Tuning"]),
];

pub struct CodeExampleTemplate {
    pub language: &'static str,
    pub code: &'static str,
}

pub const REACT_COMPONENT_EXAMPLE: CodeExampleTemplate = CodeExampleTemplate {
    language: "javascript",
    code: r#"import React, { useState, useEffect } from 'react';

function MyComponent({ title, data }) {
  const [state, setState] = useState(null);
  const [loading, setLoading] = useState(true);

  useEffect(() => {
    const fetchData = async () => {
      try {
        setLoading(true);
        const result = await someAsyncOperation();
        setState(result);
      } catch (error) {
        console.error('Error:', error);
      } finally {
        setLoading(false);
      }
    };

    fetchData();
  }, [data]);

  if (loading) {
    return <div>Loading...</div>;
  }

  return (
    <div className="my-component">
      <h2>{title}</h2>
      {state && <p>Data: {JSON.stringify(state)}</p>}
    </div>
  );
}

export default MyComponent;"#,
};

pub const EXPRESS_ROUTE_EXAMPLE: CodeExampleTemplate = CodeExampleTemplate {
    language: "javascript",
    code: r#"const express = require('express');
const router = express.Router();

router.get('/items', async (req, res) => {
  try {
    const { page = 1, limit = 10 } = req.query;
    const items = await getItems(page, limit);

    res.json({
      success: true,
      data: items,
      pagination: { page: parseInt(page), limit: parseInt(limit) }
    });
  } catch (error) {
    console.error('Error fetching items:', error);
    res.status(500).json({ success: false, error: 'Internal server error' });
  }
});

router.post('/items', async (req, res) => {
  try {
    const { name, description } = req.body;

    if (!name || !description) {
      return res.status(400).json({
        success: false,
        error: 'Name and description are required'
      });
    }

    const newItem = await createItem({ name, description });
    res.status(201).json({ success: true, data: newItem });
  } catch (error) {
    console.error('Error creating item:', error);
    res.status(500).json({ success: false, error: 'Internal server error' });
  }
});

module.exports = router;"#,
};

pub const PYTHON_FUNCTION_EXAMPLE: CodeExampleTemplate = CodeExampleTemplate {
    language: "python",
    code: r#"def process_data(data, options=None):
    """
    Process data with optional configuration.

    Args:
        data (list): Input data to process
        options (dict, optional): Processing options

    Returns:
        dict: Processed result with metadata
    """
    if not isinstance(data, list):
        raise TypeError("Data must be a list")

    if not data:
        raise ValueError("Data cannot be empty")

    default_options = {
        'sort': True,
        'filter_nulls': True,
        'transform': 'lowercase'
    }
    config = {**default_options, **(options or {})}

    result = data.copy()

    if config['filter_nulls']:
        result = [item for item in result if item is not None]

    if config['transform'] == 'lowercase':
        result = [str(item).lower() if isinstance(item, str) else item for item in result]

    if config['sort']:
        result.sort()

    return {
        'data': result,
        'original_count': len(data),
        'processed_count': len(result),
        'config': config
    }


if __name__ == "__main__":
    sample_data = ["Hello", "World", None, "Python"]
    print(process_data(sample_data))"#,
};

/// Short fallback examples per topic, used when no template rule fires.
pub const SIMPLE_EXAMPLES: &[(&str, CodeExampleTemplate)] = &[
    (
        "React",
        CodeExampleTemplate {
            language: "javascript",
            code: r#"import React, { useState } from 'react';

function ExampleComponent() {
  const [count, setCount] = useState(0);

  return (
    <div>
      <h1>Count: {count}</h1>
      <button onClick={() => setCount(count + 1)}>
        Increment
      </button>
    </div>
  );
}

export default ExampleComponent;"#,
        },
    ),
    (
        "Node.js",
        CodeExampleTemplate {
            language: "javascript",
            code: r#"const express = require('express');
const app = express();

app.use(express.json());

app.get('/', (req, res) => {
  res.json({ message: 'Hello World!' });
});

app.listen(3000, () => {
  console.log('Server running on port 3000');
});"#,
        },
    ),
    (
        "Python",
        CodeExampleTemplate {
            language: "python",
            code: r#"def greet(name, greeting="Hello"):
    """Greet a person with a custom message."""
    return f"{greeting}, {name}!"


message = greet("World")
print(message)  # Output: Hello, World!"#,
        },
    ),
];

pub fn lookup(table: &[(&'static str, &'static str)], key: &str) -> Option<&'static str> {
    table.iter().find(|(k, _)| *k == key).map(|(_, v)| *v)
}
