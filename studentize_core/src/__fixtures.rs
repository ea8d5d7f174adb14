use crate::notebook::Cell;

pub fn lesson_markdown() -> &'static str {
	"# Lists\n\nWrite `find_min`.\n\n## Solutions\n\n```python\ndef find_min(values):\n    \
	 return min(values)\n```\n\n### Solution 2\n\nUse sorting.\n\n## Next Topic\n\nDictionaries.\n"
}

pub fn lesson_markdown_student() -> String {
	let mut lines = vec!["# Lists", "", "Write `find_min`.", ""];
	lines.extend(crate::markdown::PRACTICE_TIME_LINES);
	lines.extend(["## Next Topic", "", "Dictionaries.", ""]);
	lines.join("\n")
}

pub fn lesson_notebook() -> &'static str {
	r###"{
 "cells": [
  {
   "cell_type": "markdown",
   "id": "intro",
   "metadata": {},
   "source": [
    "# Arrays\n",
    "\n",
    "Practice with lists."
   ]
  },
  {
   "cell_type": "code",
   "execution_count": null,
   "id": "exercise",
   "metadata": {},
   "outputs": [],
   "source": [
    "def find_min(values):\n",
    "    # TODO: implement\n",
    "    pass"
   ]
  },
  {
   "cell_type": "markdown",
   "id": "solutions",
   "metadata": {},
   "source": [
    "## Solutions\n"
   ]
  },
  {
   "cell_type": "code",
   "execution_count": 1,
   "id": "answer",
   "metadata": {
    "tags": [
     "solution"
    ]
   },
   "outputs": [],
   "source": [
    "def find_min(values):\n",
    "    return min(values)"
   ]
  },
  {
   "cell_type": "markdown",
   "id": "next",
   "metadata": {},
   "source": [
    "## Next Topic\n",
    "Dictionaries."
   ]
  },
  {
   "cell_type": "code",
   "execution_count": 2,
   "id": "demo",
   "metadata": {},
   "outputs": [
    {
     "name": "stdout",
     "output_type": "stream",
     "text": [
      "Café ☕\n"
     ]
    }
   ],
   "source": [
    "print(\"Café ☕\")"
   ]
  }
 ],
 "metadata": {
  "kernelspec": {
   "display_name": "Python 3",
   "language": "python",
   "name": "python3"
  },
  "language_info": {
   "name": "python",
   "version": "3.11.4"
  }
 },
 "nbformat": 4,
 "nbformat_minor": 5
}"###
}

/// A notebook without any solution content, written the way the serializer
/// writes notebooks.
pub fn plain_notebook() -> &'static str {
	r##"{
 "cells": [
  {
   "cell_type": "markdown",
   "metadata": {},
   "source": [
    "# Überblick\n",
    "Nothing to hide here."
   ]
  },
  {
   "cell_type": "raw",
   "metadata": {
    "format": "text/plain"
   },
   "source": "raw text"
  }
 ],
 "metadata": {
  "kernelspec": {
   "name": "python3"
  }
 },
 "nbformat": 4,
 "nbformat_minor": 5
}"##
}

/// Cells with keys out of sorted order and a code cell without `metadata`.
pub fn unsorted_notebook() -> &'static str {
	r##"{
 "cells": [
  {
   "source": [
    "# Intro"
   ],
   "cell_type": "markdown",
   "metadata": {}
  },
  {
   "cell_type": "code",
   "source": "x = 1",
   "outputs": [],
   "execution_count": null
  }
 ],
 "metadata": {},
 "nbformat": 4,
 "nbformat_minor": 5
}"##
}

pub fn markdown_cell(text: &str) -> Cell {
	Cell::markdown([text])
}

pub fn code_cell(text: &str) -> Cell {
	Cell::code([text])
}
